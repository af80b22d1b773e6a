//! Models for making requests.

mod get_offers;
mod inventory;
pub mod trade_offer;

pub use get_offers::GetOffersOptions;
pub use inventory::{LoadInventoryOptions, LoadPartnerInventoryOptions};
pub use trade_offer::{NewTradeOffer, NewTradeOfferBuilder, NewTradeOfferItem};
