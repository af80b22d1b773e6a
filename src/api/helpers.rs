use super::SteamTradeOffers;
use crate::SteamID;
use crate::error::{Error, ParseHtmlError};
use crate::request::{LoadInventoryOptions, LoadPartnerInventoryOptions, NewTradeOffer, NewTradeOfferItem};
use crate::serialize::steamid_as_string;
use crate::types::TradeOfferId;
use futures::Future;
use scraper::{Html, Selector};
use serde::Serialize;

/// What the `/dev/apikey` page shows.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiKeyPage {
    /// The account has a key.
    Key(String),
    /// The account is not allowed to register a key, e.g. a limited account.
    AccessDenied,
    /// The account has not registered a key yet.
    NoKey,
}

fn selector(selectors: &str) -> Result<Selector, ParseHtmlError> {
    Selector::parse(selectors)
        .map_err(|_error| ParseHtmlError::ParseSelector)
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

pub fn parse_api_key_page(body: &str) -> Result<ApiKeyPage, ParseHtmlError> {
    let document = Html::parse_document(body);
    let main_heading = selector("#mainContents h2")?;
    let body_heading = selector("#bodyContents_ex h2")?;
    let body_paragraph = selector("#bodyContents_ex p")?;

    if first_text(&document, &main_heading).as_deref() == Some("Access Denied") {
        return Ok(ApiKeyPage::AccessDenied);
    }

    if first_text(&document, &body_heading).as_deref() != Some("Your Steam Web API Key") {
        return Ok(ApiKeyPage::NoKey);
    }

    // "Key: 0123456789ABCDEF0123456789ABCDEF"
    first_text(&document, &body_paragraph)
        .and_then(|text| text.split(' ').nth(1).map(String::from))
        .filter(|key| !key.is_empty())
        .map(ApiKeyPage::Key)
        .ok_or(ParseHtmlError::Malformed("API key could not be parsed from response"))
}

pub fn parse_offer_token_page(body: &str) -> Result<String, ParseHtmlError> {
    let document = Html::parse_document(body);
    let input = selector("input#trade_offer_access_url")?;
    let offer_url = document
        .select(&input)
        .next()
        .and_then(|element| element.value().attr("value"))
        .ok_or(ParseHtmlError::Malformed("Missing trade offer access URL"))?;
    let offer_url = url::Url::parse(offer_url)
        .map_err(|_error| ParseHtmlError::Malformed("Invalid trade offer access URL"))?;

    offer_url
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, token)| token.into_owned())
        .ok_or(ParseHtmlError::Malformed("Missing token in trade offer access URL"))
}

/// The referer for requests made from a trade offer page, e.g.
/// `https://steamcommunity.com/tradeoffer/new/?partner=39734272`.
pub fn offer_referer_url(
    pathname: &str,
    partner: &SteamID,
    token: Option<&str>,
) -> Result<String, url::ParseError> {
    let mut params = vec![
        ("partner", partner.account_id().to_string()),
    ];

    if let Some(token) = token {
        params.push(("token", token.to_string()));
    }

    let url = SteamTradeOffers::get_uri(&format!("/tradeoffer/{pathname}/"));
    let url = url::Url::parse_with_params(&url, &params)?;

    Ok(url.into())
}

/// Resolves the API key from the key page, registering a key and checking the page once more
/// when the account has none.
pub async fn resolve_api_key<P, PFut, R, RFut>(
    mut get_page: P,
    register: R,
) -> Result<String, Error>
where
    P: FnMut() -> PFut,
    PFut: Future<Output = Result<ApiKeyPage, Error>>,
    R: FnOnce() -> RFut,
    RFut: Future<Output = Result<(), Error>>,
{
    match get_page().await? {
        ApiKeyPage::Key(key) => return Ok(key),
        ApiKeyPage::AccessDenied => {
            log::debug!("retrieving apikey: access denied (probably limited account)");
            return Err(Error::AccessDenied);
        },
        ApiKeyPage::NoKey => {},
    }

    register().await?;

    match get_page().await? {
        ApiKeyPage::Key(key) => Ok(key),
        ApiKeyPage::AccessDenied => Err(Error::AccessDenied),
        ApiKeyPage::NoKey => Err(Error::Html(
            ParseHtmlError::Malformed("This account does not have an API key")
        )),
    }
}

/// Form posted to `/dev/registerkey`.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterKeyForm<'a> {
    domain: &'static str,
    agree_to_terms: &'static str,
    sessionid: &'a str,
    #[serde(rename = "Submit")]
    submit: &'static str,
}

impl<'a> RegisterKeyForm<'a> {
    pub fn new(sessionid: &'a str) -> Self {
        Self {
            domain: "localhost",
            agree_to_terms: "agreed",
            sessionid,
            submit: "Register",
        }
    }
}

/// The URI, referer and query of an inventory request, without the page cursor.
#[derive(Debug, PartialEq)]
pub struct InventoryRequest {
    pub uri: String,
    pub referer: Option<String>,
    pub query: Vec<(&'static str, String)>,
}

impl InventoryRequest {
    /// Your own inventory. `language` is the effective language code.
    pub fn mine(
        options: &LoadInventoryOptions,
        language: Option<String>,
    ) -> Self {
        let uri = SteamTradeOffers::get_uri(&format!(
            "/my/inventory/json/{}/{}/",
            options.appid,
            options.contextid,
        ));
        let mut query = Vec::new();

        if let Some(language) = language {
            query.push(("l", language));
        }

        if options.tradable_only {
            query.push(("trading", "1".to_string()));
        }

        Self {
            uri,
            referer: None,
            query,
        }
    }

    /// A partner's inventory as loaded from a trade offer page.
    pub fn partner(
        options: &LoadPartnerInventoryOptions,
        sessionid: String,
        language: Option<String>,
    ) -> Result<Self, url::ParseError> {
        let offer = match options.tradeofferid {
            Some(tradeofferid) => tradeofferid.to_string(),
            None => String::from("new"),
        };
        let uri = SteamTradeOffers::get_uri(&format!("/tradeoffer/{offer}/partnerinventory/"));
        let referer = offer_referer_url(&offer, &options.partner, None)?;
        let mut query = vec![
            ("sessionid", sessionid),
            ("partner", u64::from(options.partner).to_string()),
            ("appid", options.appid.to_string()),
            ("contextid", options.contextid.to_string()),
        ];

        if let Some(language) = language {
            query.push(("l", language));
        }

        Ok(Self {
            uri,
            referer: Some(referer),
            query,
        })
    }

    /// The query for one page. `start` is the cursor from the previous page.
    pub fn page_query<'a>(&'a self, start: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
        let mut query = self.query
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect::<Vec<_>>();

        if let Some(start) = start {
            query.push(("start", start));
        }

        query
    }
}

#[derive(Serialize)]
struct OfferFormUser<'b> {
    assets: &'b [NewTradeOfferItem],
    currency: [(); 0],
    ready: bool,
}

#[derive(Serialize)]
struct OfferForm<'b> {
    newversion: bool,
    version: u32,
    me: OfferFormUser<'b>,
    them: OfferFormUser<'b>,
}

#[derive(Serialize)]
struct TradeOfferCreateParams<'b> {
    trade_offer_access_token: &'b str,
}

/// Form posted to `/tradeoffer/new/send`.
#[derive(Serialize, Debug)]
pub struct SendOfferForm<'a, 'b> {
    sessionid: &'a str,
    serverid: u32,
    #[serde(serialize_with = "steamid_as_string")]
    partner: SteamID,
    tradeoffermessage: &'b str,
    json_tradeoffer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trade_offer_create_params: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tradeofferid_countered: Option<TradeOfferId>,
}

impl<'a, 'b> SendOfferForm<'a, 'b> {
    pub fn new(
        offer: &'b NewTradeOffer,
        sessionid: &'a str,
    ) -> Result<Self, serde_json::Error> {
        let json_tradeoffer = serde_json::to_string(&OfferForm {
            newversion: true,
            version: 2,
            me: OfferFormUser {
                assets: &offer.items_to_give,
                currency: [],
                ready: false,
            },
            them: OfferFormUser {
                assets: &offer.items_to_receive,
                currency: [],
                ready: false,
            },
        })?;
        let trade_offer_create_params = offer.token
            .as_deref()
            .map(|token| serde_json::to_string(&TradeOfferCreateParams {
                trade_offer_access_token: token,
            }))
            .transpose()?;

        Ok(Self {
            sessionid,
            serverid: 1,
            partner: offer.partner,
            tradeoffermessage: offer.message.as_deref().unwrap_or_default(),
            json_tradeoffer,
            trade_offer_create_params,
            tradeofferid_countered: offer.counter_tradeofferid,
        })
    }
}

/// The page an offer is sent from: the countered offer, or the new offer page.
pub fn send_offer_referer_url(offer: &NewTradeOffer) -> Result<String, url::ParseError> {
    match offer.counter_tradeofferid {
        Some(tradeofferid) => Ok(SteamTradeOffers::get_uri(&format!("/tradeoffer/{tradeofferid}/"))),
        None => offer_referer_url("new", &offer.partner, offer.token.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Language;
    use std::collections::VecDeque;
    use serde_json::{json, Value};

    fn partner() -> SteamID {
        SteamID::from(76561198000000000)
    }

    fn item(assetid: u64) -> NewTradeOfferItem {
        NewTradeOfferItem {
            appid: 440,
            contextid: 2,
            assetid,
            amount: 1,
        }
    }

    /// Serves the given key pages in order, counting registrations.
    async fn resolve(
        pages: Vec<ApiKeyPage>,
    ) -> (Result<String, Error>, usize, usize) {
        let mut pages = VecDeque::from(pages);
        let mut page_requests = 0;
        let mut registrations = 0;
        let result = resolve_api_key(
            || {
                page_requests += 1;
                futures::future::ready(pages.pop_front().ok_or(Error::MalformedResponse))
            },
            || {
                registrations += 1;
                futures::future::ready(Ok(()))
            },
        ).await;

        (result, page_requests, registrations)
    }

    #[test]
    fn parses_api_key() {
        let page = parse_api_key_page(include_str!("fixtures/apikey.html")).unwrap();

        assert_eq!(page, ApiKeyPage::Key("0123456789ABCDEF0123456789ABCDEF".into()));
    }

    #[test]
    fn parses_access_denied() {
        let page = parse_api_key_page(include_str!("fixtures/apikey_access_denied.html")).unwrap();

        assert_eq!(page, ApiKeyPage::AccessDenied);
    }

    #[test]
    fn parses_missing_api_key() {
        let page = parse_api_key_page(include_str!("fixtures/apikey_register.html")).unwrap();

        assert_eq!(page, ApiKeyPage::NoKey);
    }

    #[test]
    fn parses_offer_token() {
        let token = parse_offer_token_page(include_str!("fixtures/tradeoffer_privacy.html")).unwrap();

        assert_eq!(token, "TkA5KFkh");
    }

    #[test]
    fn fails_without_offer_url() {
        let result = parse_offer_token_page("<html><body></body></html>");

        assert!(matches!(result, Err(ParseHtmlError::Malformed(_))));
    }

    #[test]
    fn gets_offer_referer_url() {
        let partner = SteamID::from(76561198000000000);
        let url = offer_referer_url("new", &partner, Some("token")).unwrap();

        assert_eq!(url, "https://steamcommunity.com/tradeoffer/new/?partner=39734272&token=token");

        let url = offer_referer_url("5240125484", &partner, None).unwrap();

        assert_eq!(url, "https://steamcommunity.com/tradeoffer/5240125484/?partner=39734272");
    }

    #[tokio::test]
    async fn resolves_existing_api_key_without_registering() {
        let (result, page_requests, registrations) = resolve(vec![
            ApiKeyPage::Key("KEY".into()),
        ]).await;

        assert_eq!(result.unwrap(), "KEY");
        assert_eq!(page_requests, 1);
        assert_eq!(registrations, 0);
    }

    #[tokio::test]
    async fn registers_api_key_then_checks_once_more() {
        let (result, page_requests, registrations) = resolve(vec![
            ApiKeyPage::NoKey,
            ApiKeyPage::Key("KEY".into()),
        ]).await;

        assert_eq!(result.unwrap(), "KEY");
        assert_eq!(page_requests, 2);
        assert_eq!(registrations, 1);
    }

    #[tokio::test]
    async fn gives_up_after_one_registration() {
        let (result, page_requests, registrations) = resolve(vec![
            ApiKeyPage::NoKey,
            ApiKeyPage::NoKey,
            ApiKeyPage::Key("KEY".into()),
        ]).await;

        assert!(matches!(result, Err(Error::Html(ParseHtmlError::Malformed(_)))));
        assert_eq!(page_requests, 2);
        assert_eq!(registrations, 1);
    }

    #[tokio::test]
    async fn does_not_register_when_access_denied() {
        let (result, page_requests, registrations) = resolve(vec![
            ApiKeyPage::AccessDenied,
        ]).await;

        assert!(matches!(result, Err(Error::AccessDenied)));
        assert_eq!(page_requests, 1);
        assert_eq!(registrations, 0);
    }

    #[test]
    fn builds_register_key_form() {
        let form = serde_json::to_value(RegisterKeyForm::new("abc123")).unwrap();

        assert_eq!(form, json!({
            "domain": "localhost",
            "agreeToTerms": "agreed",
            "sessionid": "abc123",
            "Submit": "Register",
        }));
    }

    #[test]
    fn builds_my_inventory_request() {
        let request = InventoryRequest::mine(&LoadInventoryOptions::new(440, 2), None);

        assert_eq!(request.uri, "https://steamcommunity.com/my/inventory/json/440/2/");
        assert_eq!(request.referer, None);
        assert_eq!(request.query, vec![("trading", "1".to_string())]);
    }

    #[test]
    fn omits_trading_when_loading_all_items() {
        let options = LoadInventoryOptions::new(440, 2).tradable_only(false);
        let request = InventoryRequest::mine(&options, None);

        assert!(request.query.is_empty());
    }

    #[test]
    fn sends_language_when_set() {
        let options = LoadInventoryOptions::new(753, 6);
        let request = InventoryRequest::mine(&options, Some(Language::German.api_language_code()));

        assert_eq!(request.uri, "https://steamcommunity.com/my/inventory/json/753/6/");
        assert_eq!(request.query, vec![
            ("l", "german".to_string()),
            ("trading", "1".to_string()),
        ]);
    }

    #[test]
    fn adds_cursor_to_later_pages() {
        let request = InventoryRequest::mine(&LoadInventoryOptions::new(440, 2), None);

        assert_eq!(request.page_query(None), vec![("trading", "1")]);
        assert_eq!(request.page_query(Some("5000")), vec![("trading", "1"), ("start", "5000")]);
    }

    #[test]
    fn builds_partner_inventory_request() {
        let options = LoadPartnerInventoryOptions::new(partner(), 440, 2);
        let request = InventoryRequest::partner(&options, "abc123".into(), None).unwrap();

        assert_eq!(request.uri, "https://steamcommunity.com/tradeoffer/new/partnerinventory/");
        assert_eq!(
            request.referer.as_deref(),
            Some("https://steamcommunity.com/tradeoffer/new/?partner=39734272"),
        );
        assert_eq!(request.query, vec![
            ("sessionid", "abc123".to_string()),
            ("partner", "76561198000000000".to_string()),
            ("appid", "440".to_string()),
            ("contextid", "2".to_string()),
        ]);
    }

    #[test]
    fn builds_partner_inventory_request_for_existing_offer() {
        let options = LoadPartnerInventoryOptions::new(partner(), 440, 2)
            .tradeofferid(5240125484);
        let request = InventoryRequest::partner(
            &options,
            "abc123".into(),
            Some("english".into()),
        ).unwrap();

        assert_eq!(request.uri, "https://steamcommunity.com/tradeoffer/5240125484/partnerinventory/");
        assert_eq!(
            request.referer.as_deref(),
            Some("https://steamcommunity.com/tradeoffer/5240125484/?partner=39734272"),
        );
        assert_eq!(request.query.last(), Some(&("l", "english".to_string())));
    }

    #[test]
    fn builds_send_offer_form() {
        let offer = NewTradeOffer::builder(partner())
            .items_to_give(vec![item(1)])
            .items_to_receive(vec![item(2)])
            .message("hi".into())
            .build();
        let form = serde_json::to_value(SendOfferForm::new(&offer, "abc123").unwrap()).unwrap();
        let json_tradeoffer: Value = serde_json::from_str(form["json_tradeoffer"].as_str().unwrap()).unwrap();

        assert_eq!(form["sessionid"], "abc123");
        assert_eq!(form["serverid"], 1);
        assert_eq!(form["partner"], "76561198000000000");
        assert_eq!(form["tradeoffermessage"], "hi");
        assert!(form.get("trade_offer_create_params").is_none());
        assert!(form.get("tradeofferid_countered").is_none());
        assert_eq!(json_tradeoffer, json!({
            "newversion": true,
            "version": 2,
            "me": {
                "assets": [{ "appid": 440, "contextid": "2", "assetid": "1", "amount": 1 }],
                "currency": [],
                "ready": false,
            },
            "them": {
                "assets": [{ "appid": 440, "contextid": "2", "assetid": "2", "amount": 1 }],
                "currency": [],
                "ready": false,
            },
        }));
        assert_eq!(
            send_offer_referer_url(&offer).unwrap(),
            "https://steamcommunity.com/tradeoffer/new/?partner=39734272",
        );
    }

    #[test]
    fn sends_token_with_offer() {
        let offer = NewTradeOffer::builder(partner())
            .token("TkA5KFkh".into())
            .build();
        let form = serde_json::to_value(SendOfferForm::new(&offer, "abc123").unwrap()).unwrap();
        let params: Value = serde_json::from_str(form["trade_offer_create_params"].as_str().unwrap()).unwrap();

        assert_eq!(form["tradeoffermessage"], "");
        assert_eq!(params, json!({ "trade_offer_access_token": "TkA5KFkh" }));
        assert_eq!(
            send_offer_referer_url(&offer).unwrap(),
            "https://steamcommunity.com/tradeoffer/new/?partner=39734272&token=TkA5KFkh",
        );
    }

    #[test]
    fn sends_counter_offer() {
        let offer = NewTradeOffer::builder(partner())
            .counter(5240125484)
            .build();
        let form = serde_json::to_value(SendOfferForm::new(&offer, "abc123").unwrap()).unwrap();

        assert_eq!(form["tradeofferid_countered"], 5240125484u64);
        assert_eq!(
            send_offer_referer_url(&offer).unwrap(),
            "https://steamcommunity.com/tradeoffer/5240125484/",
        );
    }
}
