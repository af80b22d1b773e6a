use serde::{Serialize, Deserialize};
use crate::{types::TradeOfferId, serialize::string};

/// The result returned after sending a new trade offer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SentOffer {
    /// The ID of the offer sent.
    #[serde(with = "string")]
    pub tradeofferid: TradeOfferId,
    /// Whether the offer needs mobile confirmation or not.
    #[serde(default)]
    pub needs_mobile_confirmation: bool,
    /// Whether the offer needs email confirmation or not.
    #[serde(default)]
    pub needs_email_confirmation: bool,
    /// The email domain if this offer requires email confirmation.
    pub email_domain: Option<String>,
}
