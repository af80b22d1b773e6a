use crate::error::Error;
use crate::types::AccountId;
use std::sync::Arc;
use reqwest::{header, cookie::CookieStore, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use steamid_ng::SteamID;

pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/97.0.4692.71 Safari/537.36";

/// The 64-bit Steam ID of account ID `0` for an individual account in the public universe.
const INDIVIDUAL_STEAMID_BASE: u64 = 76561197960265728;

/// Builds the HTTP client used for requests. No retry middleware is attached; a failed request
/// is reported to the caller as is.
pub fn get_default_middleware<T>(
    cookie_store: Arc<T>,
    user_agent_string: &'static str,
) -> Result<ClientWithMiddleware, reqwest::Error>
where
    T: CookieStore + 'static,
{
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent_string));

    let client = reqwest::ClientBuilder::new()
        .cookie_provider(cookie_store)
        .default_headers(headers)
        .build()?;

    Ok(ClientBuilder::new(client).build())
}

/// Reads the body of a response, failing with [`Error::Http`] on any non-200 status.
pub async fn check_response(
    response: reqwest::Response,
) -> Result<bytes::Bytes, Error> {
    let status = response.status();

    if status != StatusCode::OK {
        return Err(Error::Http(status));
    }

    Ok(response.bytes().await?)
}

/// Parses a JSON response from the Web API. Anything other than a JSON object is considered
/// malformed.
pub async fn parses_response<D>(
    response: reqwest::Response,
) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    let body = check_response(response).await?;

    parse_object(&body)
}

/// Parses the JSON response of a trade offer action on steamcommunity.com. Error responses
/// carry a message in `strError` which takes priority over the status code.
pub async fn parses_trade_response<D>(
    response: reqwest::Response,
) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    let status = response.status();
    let body = response.bytes().await?;

    parse_trade_body(status, &body)
}

fn parse_object<D>(body: &[u8]) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) if value.is_object() => Ok(serde_json::from_value(value)?),
        _ => Err(Error::MalformedResponse),
    }
}

pub(crate) fn parse_trade_body<D>(
    status: StatusCode,
    body: &[u8],
) -> Result<D, Error>
where
    D: DeserializeOwned,
{
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(rename = "strError")]
        str_error: Option<String>,
    }

    if let Ok(ErrorBody { str_error: Some(message) }) = serde_json::from_slice::<ErrorBody>(body) {
        return Err(Error::Trade(message));
    }

    if status != StatusCode::OK {
        return Err(Error::Http(status));
    }

    parse_object(body)
}

/// Converts a 32-bit account ID into the 64-bit [`SteamID`] of an individual account in the
/// public universe.
pub fn steamid_from_account_id(account_id: AccountId) -> SteamID {
    SteamID::from(INDIVIDUAL_STEAMID_BASE + u64::from(account_id))
}
