use super::SteamTradeOffers;
use crate::enums::Language;
use crate::error::Error;
use crate::helpers::{get_default_middleware, USER_AGENT_STRING};
use std::sync::{Arc, RwLock};
use reqwest::cookie::Jar;
use reqwest_middleware::ClientWithMiddleware;

/// Builder for constructing a [`SteamTradeOffers`].
#[derive(Debug, Clone)]
pub struct SteamTradeOffersBuilder {
    /// Your account's API key from <https://steamcommunity.com/dev/apikey>. If not given it is
    /// retrieved by [`SteamTradeOffers::get_api_key`].
    pub(crate) api_key: Option<String>,
    /// The language for descriptions when a request does not specify one.
    pub(crate) language: Option<Language>,
    /// Request cookies.
    pub(crate) cookie_jar: Option<Arc<Jar>>,
    /// Client to use for requests. Remember to also include the cookies connected to this client.
    pub(crate) client: Option<ClientWithMiddleware>,
    /// User agent for requests.
    pub(crate) user_agent: &'static str,
}

impl Default for SteamTradeOffersBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            language: None,
            cookie_jar: None,
            client: None,
            user_agent: USER_AGENT_STRING,
        }
    }
}

impl SteamTradeOffersBuilder {
    /// Creates a new [`SteamTradeOffersBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The API key. Required for Web API requests such as getting, declining or canceling
    /// offers.
    pub fn api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// The language for descriptions when a request does not specify one.
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// The user agent for requests. Ignored when a client is given.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Client to use for requests. It is also required to include the associated cookies with
    /// this client so that [`SteamTradeOffers::set_session`] works as expected.
    pub fn client(mut self, client: ClientWithMiddleware, cookies: Arc<Jar>) -> Self {
        self.client = Some(client);
        self.cookie_jar = Some(cookies);
        self
    }

    /// Builds the [`SteamTradeOffers`].
    pub fn build(self) -> Result<SteamTradeOffers, Error> {
        let cookies = self.cookie_jar
            .unwrap_or_default();
        let client = match self.client {
            Some(client) => client,
            None => get_default_middleware(Arc::clone(&cookies), self.user_agent)?,
        };

        Ok(SteamTradeOffers {
            client,
            cookies,
            language: self.language,
            key: Arc::new(RwLock::new(self.api_key)),
            sessionid: Arc::new(RwLock::new(None)),
        })
    }
}
