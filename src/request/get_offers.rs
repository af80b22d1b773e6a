use crate::enums::{Language, OfferFilter};
use crate::types::ServerTime;

/// Options for getting trade offers.
#[derive(Debug, Clone, PartialEq)]
pub struct GetOffersOptions {
    /// Which offers to get.
    pub filter: OfferFilter,
    /// Whether to get sent trade offers.
    pub get_sent_offers: bool,
    /// Whether to get received trade offers.
    pub get_received_offers: bool,
    /// Whether to get descriptions for items in the trade offers.
    pub get_descriptions: bool,
    /// The language for descriptions. Falls back to the language the API was built with.
    pub language: Option<Language>,
    /// Historical offers last updated before this time are not included. When `None`, every
    /// offer is included.
    pub historical_cutoff: Option<ServerTime>,
    /// The cursor returned by a previous request.
    pub cursor: Option<u32>,
}

impl Default for GetOffersOptions {
    fn default() -> Self {
        Self {
            filter: OfferFilter::ActiveOnly,
            get_sent_offers: true,
            get_received_offers: true,
            get_descriptions: false,
            language: None,
            historical_cutoff: None,
            cursor: None,
        }
    }
}
