use super::Asset;
use crate::SteamID;
use crate::enums::{ConfirmationMethod, TradeOfferState};
use crate::helpers::steamid_from_account_id;
use crate::serialize::{string, option_string, option_timestamp_0_as_none};
use crate::types::{AccountId, ServerTime, TradeId, TradeOfferId};
use chrono::serde::ts_seconds;
use serde::Deserialize;

/// A trade offer from the Web API.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "RawTradeOffer")]
pub struct TradeOffer {
    pub tradeofferid: TradeOfferId,
    /// The ID of the trade once the offer is accepted.
    pub tradeid: Option<TradeId>,
    /// The account ID of the partner.
    pub accountid_other: AccountId,
    /// The Steam ID of the partner.
    pub steamid_other: SteamID,
    pub message: Option<String>,
    pub items_to_give: Vec<Asset>,
    pub items_to_receive: Vec<Asset>,
    pub is_our_offer: bool,
    pub from_real_time_trade: bool,
    pub expiration_time: ServerTime,
    pub time_created: ServerTime,
    pub time_updated: ServerTime,
    pub trade_offer_state: TradeOfferState,
    /// When the trade leaves escrow, if it is held.
    pub escrow_end_date: Option<ServerTime>,
    pub confirmation_method: ConfirmationMethod,
}

impl TradeOffer {
    /// Checks whether the trade offer is glitched or not by checking if no items are present.
    pub fn is_glitched(&self) -> bool {
        self.items_to_receive.is_empty() && self.items_to_give.is_empty()
    }
}

#[derive(Deserialize, Debug)]
struct RawTradeOffer {
    #[serde(with = "string")]
    tradeofferid: TradeOfferId,
    #[serde(default, with = "option_string")]
    tradeid: Option<TradeId>,
    accountid_other: AccountId,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    items_to_give: Vec<Asset>,
    #[serde(default)]
    items_to_receive: Vec<Asset>,
    #[serde(default)]
    is_our_offer: bool,
    #[serde(default)]
    from_real_time_trade: bool,
    #[serde(with = "ts_seconds")]
    expiration_time: ServerTime,
    #[serde(with = "ts_seconds")]
    time_created: ServerTime,
    #[serde(with = "ts_seconds")]
    time_updated: ServerTime,
    trade_offer_state: TradeOfferState,
    #[serde(default, deserialize_with = "option_timestamp_0_as_none")]
    escrow_end_date: Option<ServerTime>,
    confirmation_method: ConfirmationMethod,
}

impl From<RawTradeOffer> for TradeOffer {
    fn from(offer: RawTradeOffer) -> Self {
        Self {
            steamid_other: steamid_from_account_id(offer.accountid_other),
            tradeofferid: offer.tradeofferid,
            tradeid: offer.tradeid,
            accountid_other: offer.accountid_other,
            message: offer.message.filter(|message| !message.is_empty()),
            items_to_give: offer.items_to_give,
            items_to_receive: offer.items_to_receive,
            is_our_offer: offer.is_our_offer,
            from_real_time_trade: offer.from_real_time_trade,
            expiration_time: offer.expiration_time,
            time_created: offer.time_created,
            time_updated: offer.time_updated,
            trade_offer_state: offer.trade_offer_state,
            escrow_end_date: offer.escrow_end_date,
            confirmation_method: offer.confirmation_method,
        }
    }
}
