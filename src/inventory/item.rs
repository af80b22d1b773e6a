use crate::types::{Amount, AssetId, ClassId, ContextId, InstanceId};
use std::collections::HashMap;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shared metadata for items of the same class and instance: names, type, tradability, icons
/// and whatever else the app attaches. Keyed by `{classid}_{instanceid}` in inventory pages.
pub type ItemDescription = Map<String, Value>;

/// One owned item instance with its description merged on.
///
/// Items are kept as open JSON objects since descriptions carry app-specific fields. Typed
/// accessors are provided for the identifying fields, which Steam sends as either strings or
/// numbers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryItem(Map<String, Value>);

impl InventoryItem {
    /// Creates an item from its raw fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Gets a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Gets a string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// All fields of this item.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the item, returning its fields.
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// The asset ID.
    pub fn id(&self) -> Option<AssetId> {
        self.get_number("id")
    }

    /// The class ID.
    pub fn classid(&self) -> Option<ClassId> {
        self.get_number("classid")
    }

    /// The instance ID. An instance ID of `0` is treated as no instance.
    pub fn instanceid(&self) -> InstanceId {
        self.get_number::<u64>("instanceid").filter(|instanceid| *instanceid != 0)
    }

    /// The context ID this item was loaded from.
    pub fn contextid(&self) -> Option<ContextId> {
        self.get_number("contextid")
    }

    /// The amount. Defaults to `1` when not present.
    pub fn amount(&self) -> Amount {
        self.get_number("amount").unwrap_or(1)
    }

    /// Whether the merged description marks this item as tradable.
    pub fn is_tradable(&self) -> bool {
        match self.0.get("tradable") {
            Some(Value::Bool(tradable)) => *tradable,
            Some(Value::Number(n)) => n.as_u64() == Some(1),
            Some(Value::String(s)) => s == "1",
            _ => false,
        }
    }

    /// The key of this item's description in `rgDescriptions`: `{classid}_{instanceid}`, with
    /// a missing or empty instance ID written as `0`.
    pub fn description_key(&self) -> Option<String> {
        let classid = key_part(self.0.get("classid")?)?;
        let instanceid = self.0.get("instanceid")
            .and_then(key_part)
            .unwrap_or_else(|| "0".into());

        Some(format!("{classid}_{instanceid}"))
    }

    fn get_number<T>(&self, key: &str) -> Option<T>
    where
        T: FromStr + TryFrom<u64>,
    {
        match self.0.get(key)? {
            Value::String(s) => s.parse::<T>().ok(),
            Value::Number(n) => n.as_u64().and_then(|n| T::try_from(n).ok()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for InventoryItem {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn key_part(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_u64() != Some(0) => Some(n.to_string()),
        _ => None,
    }
}

/// Overlays every field of `description` onto `item`. Description values replace stub values
/// of the same name.
pub fn merge_description(
    mut item: InventoryItem,
    description: &ItemDescription,
) -> InventoryItem {
    for (key, value) in description {
        item.0.insert(key.clone(), value.clone());
    }

    item
}

/// Merges each raw item with its description and stamps it with `contextid`, preserving the
/// order of `items`.
pub(crate) fn merge_with_descriptions(
    items: Vec<(String, Map<String, Value>)>,
    descriptions: &HashMap<String, ItemDescription>,
    contextid: ContextId,
) -> Vec<InventoryItem> {
    items
        .into_iter()
        .map(|(_id, stub)| {
            let mut item = InventoryItem::from(stub);

            if let Some(description) = item.description_key()
                .and_then(|key| descriptions.get(&key))
            {
                item = merge_description(item, description);
            }

            // the server omits contextid on some items and sends conflicting values on others
            item.0.insert("contextid".into(), Value::from(contextid));
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn description_fields_overwrite_stub_fields() {
        let item = InventoryItem::from(object(json!({
            "classid": "10",
            "instanceid": "0",
            "name": "stub name",
            "pos": 1,
        })));
        let description = object(json!({
            "name": "Widget",
            "tradable": 1,
        }));
        let merged = merge_description(item, &description);

        assert_eq!(merged.get_str("name"), Some("Widget"));
        assert_eq!(merged.get("pos"), Some(&json!(1)));
        assert!(merged.is_tradable());
    }

    #[test]
    fn builds_description_key() {
        let item = InventoryItem::from(object(json!({ "classid": "101785959", "instanceid": "11040578" })));

        assert_eq!(item.description_key().as_deref(), Some("101785959_11040578"));

        let item = InventoryItem::from(object(json!({ "classid": 2674 })));

        assert_eq!(item.description_key().as_deref(), Some("2674_0"));

        let item = InventoryItem::from(object(json!({ "classid": "2674", "instanceid": "" })));

        assert_eq!(item.description_key().as_deref(), Some("2674_0"));

        let item = InventoryItem::from(object(json!({ "instanceid": "1" })));

        assert_eq!(item.description_key(), None);
    }

    #[test]
    fn forces_contextid_on_every_item() {
        let items = vec![
            ("1".to_string(), object(json!({ "classid": "10", "contextid": "6" }))),
            ("2".to_string(), object(json!({ "classid": "11" }))),
        ];
        let descriptions = HashMap::from([
            ("10_0".to_string(), object(json!({ "contextid": "7", "market_name": "Widget" }))),
        ]);
        let merged = merge_with_descriptions(items, &descriptions, 2);

        assert!(merged.iter().all(|item| item.contextid() == Some(2)));
        assert_eq!(merged[0].get_str("market_name"), Some("Widget"));
    }

    #[test]
    fn leaves_items_without_description_untouched() {
        let stub = object(json!({ "id": "5", "classid": "99", "instanceid": "3", "amount": "4" }));
        let merged = merge_with_descriptions(
            vec![("5".to_string(), stub.clone())],
            &HashMap::new(),
            2,
        );
        let mut expected = stub;

        expected.insert("contextid".into(), json!(2));

        assert_eq!(merged, vec![InventoryItem::from(expected)]);
        assert_eq!(merged[0].id(), Some(5));
        assert_eq!(merged[0].instanceid(), Some(3));
        assert_eq!(merged[0].amount(), 4);
        assert!(!merged[0].is_tradable());
    }
}
