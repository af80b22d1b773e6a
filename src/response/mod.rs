//! Models for responses.

mod accepted_offer;
mod asset;
mod sent_offer;
mod trade_offer;

pub use accepted_offer::AcceptedOffer;
pub use asset::Asset;
pub use sent_offer::SentOffer;
pub use trade_offer::TradeOffer;

use serde_json::{Map, Value};

/// Trade offers returned by `GetTradeOffers`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeOffers {
    /// Offers you sent.
    pub sent: Vec<TradeOffer>,
    /// Offers you received.
    pub received: Vec<TradeOffer>,
    /// Item descriptions, present when requested.
    pub descriptions: Vec<Map<String, Value>>,
    /// The cursor for the next request, if there are more offers.
    pub next_cursor: Option<u32>,
}
