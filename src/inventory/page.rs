use super::item::{merge_with_descriptions, InventoryItem, ItemDescription};
use crate::error::Error;
use crate::serialize::{into_bool, option_string_or_number};
use crate::types::ContextId;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};

/// Raw item stubs in the order the server sent them, paired with their keys.
type RgCollection = Vec<(String, Map<String, Value>)>;

/// One page of an inventory as sent by the server.
#[derive(Deserialize, Debug, Default)]
pub struct InventoryPage {
    #[serde(default, rename = "rgInventory", deserialize_with = "deserialize_rg_collection")]
    pub assets: RgCollection,
    #[serde(default, rename = "rgCurrency", deserialize_with = "deserialize_rg_collection")]
    pub currency: RgCollection,
    #[serde(default, rename = "rgDescriptions", deserialize_with = "deserialize_rg_descriptions")]
    pub descriptions: HashMap<String, ItemDescription>,
    #[serde(default, deserialize_with = "into_bool")]
    pub more: bool,
    #[serde(default, deserialize_with = "option_string_or_number")]
    pub more_start: Option<String>,
}

impl InventoryPage {
    /// Merges the page's items, then its currency, with their descriptions.
    pub fn into_items(self, contextid: ContextId) -> Vec<InventoryItem> {
        let mut items = merge_with_descriptions(self.assets, &self.descriptions, contextid);
        let mut currency = merge_with_descriptions(self.currency, &self.descriptions, contextid);

        items.append(&mut currency);
        items
    }
}

/// The classification of a response to an inventory page request.
#[derive(Debug)]
pub enum InventoryResponse {
    /// A valid page.
    Page(InventoryPage),
    /// The server responded with a non-success status code.
    Status(StatusCode),
    /// The server responded with an empty object.
    Blank,
    /// The body is not a JSON object, which happens when the session is invalid or expired.
    NoSession,
    /// The server reported `"success": false`.
    NotFound,
    /// The body is an array. The server sends this for private inventories.
    Private,
}

impl InventoryResponse {
    /// Classifies a response. Checks are applied in order: status code, blank body, body
    /// shape, success flag.
    pub fn classify(
        status: StatusCode,
        body: &[u8],
    ) -> Result<Self, Error> {
        if status != StatusCode::OK {
            return Ok(Self::Status(status));
        }

        let value = match serde_json::from_slice::<Value>(body) {
            Ok(value) => value,
            Err(_) => return Ok(Self::NoSession),
        };

        match value {
            Value::Object(ref map) if map.is_empty() => Ok(Self::Blank),
            Value::Object(ref map) if map.get("success") == Some(&Value::Bool(false)) => {
                Ok(Self::NotFound)
            },
            Value::Object(_) => Ok(Self::Page(serde_json::from_value(value)?)),
            Value::Array(_) => Ok(Self::Private),
            _ => Ok(Self::NoSession),
        }
    }

    /// Converts into the page, or the error this response represents.
    pub fn into_page(self) -> Result<InventoryPage, Error> {
        match self {
            Self::Page(page) => Ok(page),
            Self::Status(status) => Err(Error::Http(status)),
            Self::Blank => Err(Error::BlankResponse),
            Self::NoSession => Err(Error::NoSession),
            Self::NotFound => Err(Error::InventoryNotFound),
            Self::Private => Err(Error::PrivateInventory),
        }
    }
}

fn deserialize_rg_collection<'de, D>(deserializer: D) -> Result<RgCollection, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(KeyedVisitor::new())
}

fn deserialize_rg_descriptions<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, ItemDescription>, D::Error>
where
    D: Deserializer<'de>,
{
    let descriptions: Vec<(String, Value)> = deserializer
        .deserialize_any(KeyedVisitor::new())?;

    // entries that are not objects describe nothing
    Ok(descriptions
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Object(description) => Some((key, description)),
            _ => None,
        })
        .collect())
}

/// Reads a keyed collection in document order. The server sends an empty array instead of an
/// empty object; arrays are keyed by index.
struct KeyedVisitor<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> KeyedVisitor<T> {
    fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, T> Visitor<'de> for KeyedVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Vec<(String, T)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map or seq")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Vec::new())
    }

    fn visit_seq<M>(self, mut seq: M) -> Result<Self::Value, M::Error>
    where
        M: SeqAccess<'de>,
    {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));

        while let Some(value) = seq.next_element::<T>()? {
            values.push((values.len().to_string(), value));
        }

        Ok(values)
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut values = Vec::with_capacity(access.size_hint().unwrap_or(0));

        while let Some(key) = access.next_key::<String>()? {
            let value = access.next_value::<T>()?;

            values.push((key, value));
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(body: &str) -> InventoryResponse {
        InventoryResponse::classify(StatusCode::OK, body.as_bytes()).unwrap()
    }

    #[test]
    fn parses_inventory_page() {
        let body = include_str!("fixtures/inventory_page.json");
        let page = match classify(body) {
            InventoryResponse::Page(page) => page,
            response => panic!("unexpected response: {response:?}"),
        };

        assert_eq!(page.assets.len(), 3);
        assert_eq!(page.currency.len(), 0);
        assert!(!page.more);
        assert_eq!(page.more_start, None);

        let keys = page.assets
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>();

        // document order, not numeric order
        assert_eq!(keys, vec!["11152148507", "1789265617", "11152148508"]);
    }

    #[test]
    fn merges_fixture_page() {
        let page = classify(include_str!("fixtures/inventory_page.json"))
            .into_page()
            .unwrap();
        let items = page.into_items(2);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].get_str("market_hash_name"), Some("Mann Co. Supply Crate Key"));
        assert_eq!(items[1].get_str("market_hash_name"), Some("Refined Metal"));
        // no description for the third item
        assert_eq!(items[2].get("market_hash_name"), None);
        assert!(items.iter().all(|item| item.contextid() == Some(2)));
    }

    #[test]
    fn appends_currency_after_items() {
        let page = classify(include_str!("fixtures/currency_page.json"))
            .into_page()
            .unwrap();
        let items = page.into_items(2);
        let names = items
            .iter()
            .map(|item| item.get_str("name"))
            .collect::<Vec<_>>();

        assert_eq!(names, vec![Some("Gem"), Some("Gems")]);
    }

    #[test]
    fn classifies_scenario_page() {
        let body = json!({
            "rgInventory": { "1": { "classid": "10", "instanceid": "0" } },
            "rgDescriptions": { "10_0": { "market_name": "Widget" } },
            "more": false,
        }).to_string();
        let items = classify(&body).into_page().unwrap().into_items(2);
        let expected = json!([{
            "classid": "10",
            "instanceid": "0",
            "market_name": "Widget",
            "contextid": 2,
        }]);

        assert_eq!(serde_json::to_value(&items).unwrap(), expected);
    }

    #[test]
    fn reads_empty_arrays_as_empty_collections() {
        let page = classify(r#"{"success":true,"rgInventory":[],"rgCurrency":[],"rgDescriptions":[],"more":false,"more_start":false}"#)
            .into_page()
            .unwrap();

        assert!(page.into_items(2).is_empty());
    }

    #[test]
    fn classifies_array_as_private() {
        assert!(matches!(classify("[]"), InventoryResponse::Private));
        assert!(matches!(classify("[]").into_page(), Err(Error::PrivateInventory)));
    }

    #[test]
    fn classifies_unsuccessful_as_not_found() {
        assert!(matches!(classify(r#"{"success":false}"#), InventoryResponse::NotFound));
        assert!(matches!(classify(r#"{"success":false}"#).into_page(), Err(Error::InventoryNotFound)));
    }

    #[test]
    fn classifies_blank_object_as_transport_error() {
        let error = classify("{}").into_page().unwrap_err();

        assert!(matches!(error, Error::BlankResponse));
        assert!(error.is_transport());
    }

    #[test]
    fn classifies_non_json_as_no_session() {
        assert!(matches!(classify("<!DOCTYPE html><html></html>"), InventoryResponse::NoSession));
        assert!(matches!(classify(""), InventoryResponse::NoSession));
        assert!(matches!(classify("null"), InventoryResponse::NoSession));
        assert!(matches!(classify("\"string\""), InventoryResponse::NoSession));
    }

    #[test]
    fn status_takes_precedence_over_shape() {
        let response = InventoryResponse::classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            b"<html>not an object</html>",
        ).unwrap();

        assert!(matches!(response, InventoryResponse::Status(StatusCode::INTERNAL_SERVER_ERROR)));
        assert!(response.into_page().unwrap_err().is_transport());
    }

    #[test]
    fn skips_descriptions_that_are_not_objects() {
        let body = json!({
            "rgInventory": {
                "1": { "id": "1", "classid": "10", "instanceid": "0" },
                "2": { "id": "2", "classid": "20", "instanceid": "0" },
            },
            "rgDescriptions": {
                "10_0": null,
                "20_0": { "market_name": "Widget" },
            },
        }).to_string();
        let items = classify(&body).into_page().unwrap().into_items(2);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get("market_name"), None);
        assert_eq!(items[0].get_str("classid"), Some("10"));
        assert_eq!(items[1].get_str("market_name"), Some("Widget"));
    }

    #[test]
    fn rejects_malformed_stubs() {
        let result = InventoryResponse::classify(
            StatusCode::OK,
            br#"{"rgInventory":{"1":"not an object"}}"#,
        );

        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
