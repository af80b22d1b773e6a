//! Enumerated types.

mod confirmation_method;
mod language;
mod offer_filter;
mod trade_offer_state;

pub use confirmation_method::ConfirmationMethod;
pub use language::Language;
pub use offer_filter::OfferFilter;
pub use trade_offer_state::TradeOfferState;
