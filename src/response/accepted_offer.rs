use serde::{Serialize, Deserialize};
use crate::{types::TradeId, serialize::option_string};

/// The result returned after accepting a trade offer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AcceptedOffer {
    /// The ID of the trade, present when the trade went through without confirmation.
    #[serde(default, with = "option_string")]
    pub tradeid: Option<TradeId>,
    #[serde(default)]
    pub needs_mobile_confirmation: bool,
    #[serde(default)]
    pub needs_email_confirmation: bool,
    pub email_domain: Option<String>,
}
