mod api_response;
mod builder;
mod helpers;

pub use builder::SteamTradeOffersBuilder;

use helpers::{
    parse_api_key_page,
    parse_offer_token_page,
    resolve_api_key,
    send_offer_referer_url,
    ApiKeyPage,
    InventoryRequest,
    RegisterKeyForm,
    SendOfferForm,
};
use api_response::{GetTradeOfferResponse, GetTradeOffersResponse};
use crate::enums::{Language, OfferFilter};
use crate::error::Error;
use crate::helpers::{check_response, parses_response, parses_trade_response};
use crate::inventory::{aggregate_pages, InventoryItem, InventoryResponse};
use crate::request::{
    GetOffersOptions,
    LoadInventoryOptions,
    LoadPartnerInventoryOptions,
    NewTradeOffer,
};
use crate::response::{AcceptedOffer, SentOffer, TradeOffer, TradeOffers};
use crate::serialize::string;
use crate::time::get_system_time;
use crate::types::{ContextId, HttpClient, TradeOfferId};
use std::sync::{Arc, RwLock};
use reqwest::cookie::Jar;
use reqwest::header::REFERER;
use serde::{Deserialize, Serialize};
use url::Url;

const ONE_YEAR_SECS: u64 = 31536000;

/// A session on steamcommunity.com for loading inventories and managing trade offers.
#[derive(Debug)]
pub struct SteamTradeOffers {
    client: HttpClient,
    cookies: Arc<Jar>,
    language: Option<Language>,
    key: Arc<RwLock<Option<String>>>,
    sessionid: Arc<RwLock<Option<String>>>,
}

impl SteamTradeOffers {
    pub const HOSTNAME: &'static str = "https://steamcommunity.com";
    pub const API_HOSTNAME: &'static str = "https://api.steampowered.com";

    /// Creates a [`SteamTradeOffers`] with default settings.
    pub fn new() -> Result<Self, Error> {
        SteamTradeOffersBuilder::new().build()
    }

    /// Creates a builder for configuring a [`SteamTradeOffers`].
    pub fn builder() -> SteamTradeOffersBuilder {
        SteamTradeOffersBuilder::new()
    }

    pub(crate) fn get_uri(pathname: &str) -> String {
        format!("{}{}", Self::HOSTNAME, pathname)
    }

    fn get_api_url(
        interface: &str,
        method: &str,
        version: usize,
    ) -> String {
        format!("{}/{}/{}/v{}", Self::API_HOSTNAME, interface, method, version)
    }

    fn sessionid(&self) -> Option<String> {
        self.sessionid
            .read()
            .unwrap_or_else(|error| error.into_inner())
            .clone()
    }

    fn require_sessionid(&self) -> Result<String, Error> {
        self.sessionid().ok_or(Error::NotLoggedIn)
    }

    /// The API key, if one is known.
    pub fn api_key(&self) -> Option<String> {
        self.key
            .read()
            .unwrap_or_else(|error| error.into_inner())
            .clone()
    }

    fn require_api_key(&self) -> Result<String, Error> {
        self.api_key().ok_or(Error::MissingApiKey)
    }

    fn set_api_key(&self, key: &str) {
        *self.key.write().unwrap_or_else(|error| error.into_inner()) = Some(key.to_string());
    }

    fn language_code(&self, language: Option<Language>) -> Option<String> {
        language
            .or(self.language)
            .map(|language| language.api_language_code())
    }

    /// Sets the session ID and adds the login cookies, e.g. `steamLoginSecure=...`, for
    /// steamcommunity.com.
    pub fn set_session(
        &self,
        sessionid: &str,
        cookies: &[String],
    ) -> Result<(), Error> {
        let url = Self::HOSTNAME.parse::<Url>()?;

        for cookie_str in cookies {
            self.cookies.add_cookie_str(cookie_str, &url);
        }

        // make sure the sessionid cookie matches the sessionid sent in forms
        self.cookies.add_cookie_str(&format!("sessionid={sessionid}"), &url);
        *self.sessionid.write().unwrap_or_else(|error| error.into_inner()) = Some(sessionid.to_string());

        Ok(())
    }

    /// Sets the session then retrieves the API key.
    pub async fn setup(
        &self,
        sessionid: &str,
        cookies: &[String],
    ) -> Result<String, Error> {
        self.set_session(sessionid, cookies)?;
        self.get_api_key().await
    }

    /// Gets your Steam Web API key. If your account does not have an API key, one is registered
    /// using `localhost` as the domain. By calling this method you are agreeing to the
    /// [Steam Web API Terms of Use](https://steamcommunity.com/dev/apiterms).
    pub async fn get_api_key(&self) -> Result<String, Error> {
        if let Some(key) = self.api_key() {
            return Ok(key);
        }

        let key = resolve_api_key(
            || self.get_api_key_page(),
            || self.register_api_key(),
        ).await?;

        self.set_api_key(&key);
        Ok(key)
    }

    async fn register_api_key(&self) -> Result<(), Error> {
        let sessionid = self.require_sessionid()?;
        let uri = Self::get_uri("/dev/registerkey");
        let response = self.client.post(&uri)
            .form(&RegisterKeyForm::new(&sessionid))
            .send()
            .await?;

        if !response.status().is_success() {
            log::debug!("registering apikey: {}", response.status());
        }

        Ok(())
    }

    async fn get_api_key_page(&self) -> Result<ApiKeyPage, Error> {
        let uri = Self::get_uri("/dev/apikey");
        let response = self.client.get(&uri)
            .send()
            .await?;
        let body = check_response(response)
            .await
            .inspect_err(|error| log::debug!("retrieving apikey: {error}"))?;

        Ok(parse_api_key_page(&String::from_utf8_lossy(&body))?)
    }

    /// Gets the token from your trade offer access URL.
    pub async fn get_offer_token(&self) -> Result<String, Error> {
        let uri = Self::get_uri("/id/me/tradeoffers/privacy");
        let response = self.client.get(&uri)
            .send()
            .await?;
        let body = check_response(response)
            .await
            .inspect_err(|error| log::debug!("retrieving offer token: {error}"))?;

        Ok(parse_offer_token_page(&String::from_utf8_lossy(&body))?)
    }

    /// Loads your inventory. Every item has its description merged on and `contextid` set to
    /// the requested context.
    pub async fn load_my_inventory(
        &self,
        options: &LoadInventoryOptions,
    ) -> Result<Vec<InventoryItem>, Error> {
        let request = InventoryRequest::mine(options, self.language_code(options.language));

        self.load_inventory(&request, options.contextid).await
    }

    /// Loads a trade partner's inventory as shown on a trade offer page.
    pub async fn load_partner_inventory(
        &self,
        options: &LoadPartnerInventoryOptions,
    ) -> Result<Vec<InventoryItem>, Error> {
        let sessionid = self.require_sessionid()?;
        let request = InventoryRequest::partner(
            options,
            sessionid,
            self.language_code(options.language),
        )?;

        self.load_inventory(&request, options.contextid).await
    }

    async fn load_inventory(
        &self,
        request: &InventoryRequest,
        contextid: ContextId,
    ) -> Result<Vec<InventoryItem>, Error> {
        aggregate_pages(contextid, |start| {
            self.get_inventory_page(request, start)
        }).await
    }

    async fn get_inventory_page(
        &self,
        request: &InventoryRequest,
        start: Option<String>,
    ) -> Result<InventoryResponse, Error> {
        let mut builder = self.client.get(&request.uri)
            .query(&request.page_query(start.as_deref()));

        if let Some(referer) = &request.referer {
            builder = builder.header(REFERER, referer);
        }

        let response = builder
            .send()
            .await
            .inspect_err(|error| log::debug!("loading inventory: {error}"))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .inspect_err(|error| log::debug!("loading inventory: {error}"))?;
        let response = InventoryResponse::classify(status, &body)
            .inspect_err(|error| log::debug!("loading inventory: {error}"))?;

        match &response {
            InventoryResponse::Status(status) => log::debug!("loading inventory: {status}"),
            InventoryResponse::Blank => log::debug!("loading inventory: {{}}"),
            _ => {},
        }

        Ok(response)
    }

    /// Sends an offer, or a counter offer if the offer counters another.
    pub async fn make_offer(
        &self,
        offer: &NewTradeOffer,
    ) -> Result<SentOffer, Error> {
        let sessionid = self.require_sessionid()?;
        let referer = send_offer_referer_url(offer)?;
        let form = SendOfferForm::new(offer, &sessionid)?;
        let uri = Self::get_uri("/tradeoffer/new/send");
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&form)
            .send()
            .await?;

        parses_trade_response(response)
            .await
            .inspect_err(|error| log::debug!("making an offer: {error}"))
    }

    /// Accepts an offer.
    pub async fn accept_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<AcceptedOffer, Error> {
        #[derive(Serialize)]
        struct AcceptOfferParams<'a> {
            sessionid: &'a str,
            serverid: u32,
            #[serde(with = "string")]
            tradeofferid: TradeOfferId,
        }

        let sessionid = self.require_sessionid()?;
        let referer = Self::get_uri(&format!("/tradeoffer/{tradeofferid}/"));
        let uri = Self::get_uri(&format!("/tradeoffer/{tradeofferid}/accept"));
        let response = self.client.post(&uri)
            .header(REFERER, referer)
            .form(&AcceptOfferParams {
                sessionid: &sessionid,
                serverid: 1,
                tradeofferid,
            })
            .send()
            .await?;

        parses_trade_response(response)
            .await
            .inspect_err(|error| log::debug!("accepting offer: {error}"))
    }

    /// Declines an offer you received.
    pub async fn decline_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<(), Error> {
        self.post_offer_action("DeclineTradeOffer", tradeofferid).await
    }

    /// Cancels an offer you sent.
    pub async fn cancel_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<(), Error> {
        self.post_offer_action("CancelTradeOffer", tradeofferid).await
    }

    async fn post_offer_action(
        &self,
        method: &str,
        tradeofferid: TradeOfferId,
    ) -> Result<(), Error> {
        #[derive(Serialize)]
        struct Form<'a> {
            key: &'a str,
            #[serde(with = "string")]
            tradeofferid: TradeOfferId,
        }

        #[derive(Deserialize)]
        struct Response {}

        let key = self.require_api_key()?;
        let uri = Self::get_api_url("IEconService", method, 1);
        let response = self.client.post(&uri)
            .form(&Form {
                key: &key,
                tradeofferid,
            })
            .send()
            .await?;
        let _body: Response = parses_response(response)
            .await
            .inspect_err(|error| log::debug!("doing API call {method}: {error}"))?;

        Ok(())
    }

    /// Gets trade offers. Each offer has `steamid_other` set from its `accountid_other`.
    pub async fn get_offers(
        &self,
        options: &GetOffersOptions,
    ) -> Result<TradeOffers, Error> {
        #[derive(Serialize)]
        struct Form<'a> {
            key: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            language: Option<String>,
            active_only: bool,
            historical_only: bool,
            get_sent_offers: bool,
            get_received_offers: bool,
            get_descriptions: bool,
            time_historical_cutoff: u64,
            #[serde(skip_serializing_if = "Option::is_none")]
            cursor: Option<u32>,
        }

        let key = self.require_api_key()?;
        let time_historical_cutoff = match options.historical_cutoff {
            Some(cutoff) => cutoff.timestamp().max(0) as u64,
            None => get_system_time() + ONE_YEAR_SECS,
        };
        let uri = Self::get_api_url("IEconService", "GetTradeOffers", 1);
        let response = self.client.get(&uri)
            .query(&Form {
                key: &key,
                language: self.language_code(options.language),
                active_only: options.filter == OfferFilter::ActiveOnly,
                historical_only: options.filter == OfferFilter::HistoricalOnly,
                get_sent_offers: options.get_sent_offers,
                get_received_offers: options.get_received_offers,
                get_descriptions: options.get_descriptions,
                time_historical_cutoff,
                cursor: options.cursor,
            })
            .send()
            .await?;
        let body: GetTradeOffersResponse = parses_response(response)
            .await
            .inspect_err(|error| log::debug!("doing API call GetTradeOffers: {error}"))?;

        Ok(body.into())
    }

    /// Gets a single trade offer. Returns `None` if the offer does not exist.
    pub async fn get_offer(
        &self,
        tradeofferid: TradeOfferId,
    ) -> Result<Option<TradeOffer>, Error> {
        #[derive(Serialize)]
        struct Form<'a> {
            key: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            language: Option<String>,
            tradeofferid: TradeOfferId,
        }

        let key = self.require_api_key()?;
        let uri = Self::get_api_url("IEconService", "GetTradeOffer", 1);
        let response = self.client.get(&uri)
            .query(&Form {
                key: &key,
                language: self.language_code(None),
                tradeofferid,
            })
            .send()
            .await?;
        let body: GetTradeOfferResponse = parses_response(response)
            .await
            .inspect_err(|error| log::debug!("doing API call GetTradeOffer: {error}"))?;

        Ok(body.response.offer)
    }
}
