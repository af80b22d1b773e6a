//! Loads Steam inventories and manages trade offers using a steamcommunity.com session.
//!
//! ```no_run
//! use steam_tradeoffers::{SteamTradeOffers, request::LoadInventoryOptions};
//!
//! # async fn run() -> Result<(), steam_tradeoffers::error::Error> {
//! let api = SteamTradeOffers::new()?;
//!
//! api.set_session("sessionid", &["steamLoginSecure=...".into()])?;
//!
//! let items = api.load_my_inventory(&LoadInventoryOptions::new(440, 2)).await?;
//! # Ok(())
//! # }
//! ```

mod api;
mod helpers;
pub mod enums;
pub mod error;
pub mod inventory;
pub mod request;
pub mod response;
pub mod serialize;
pub mod time;
pub mod types;

pub use api::{SteamTradeOffers, SteamTradeOffersBuilder};
pub use enums::{ConfirmationMethod, Language, OfferFilter, TradeOfferState};
pub use error::{Error, ParseHtmlError};
pub use helpers::steamid_from_account_id;
pub use inventory::InventoryItem;
pub use response::TradeOffer;
pub use steamid_ng::SteamID;
