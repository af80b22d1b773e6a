mod item;
mod builder;

pub use item::NewTradeOfferItem;
pub use builder::NewTradeOfferBuilder;

use crate::SteamID;
use crate::types::TradeOfferId;

/// A trade offer not yet sent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTradeOffer {
    /// The partner's [`SteamID`].
    pub partner: SteamID,
    /// The items to give.
    pub items_to_give: Vec<NewTradeOfferItem>,
    /// The items to receive.
    pub items_to_receive: Vec<NewTradeOfferItem>,
    /// The message to send with the offer.
    pub message: Option<String>,
    /// The access token for sending an offer if you are not friends with the partner.
    pub token: Option<String>,
    /// The offer this offer counters.
    pub counter_tradeofferid: Option<TradeOfferId>,
}

impl NewTradeOffer {
    /// Creates a [`NewTradeOfferBuilder`] for an offer to `partner`.
    pub fn builder(partner: SteamID) -> NewTradeOfferBuilder {
        NewTradeOfferBuilder::new(partner)
    }

    /// Checks if any items are included in the offer.
    pub fn is_empty(&self) -> bool {
        self.items_to_give.is_empty() &&
        self.items_to_receive.is_empty()
    }
}
