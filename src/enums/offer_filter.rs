use strum_macros::{Display, EnumString};

/// Filter for getting trade offers.
#[derive(Display, EnumString, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum OfferFilter {
    /// Fetch active offers only.
    #[default]
    ActiveOnly,
    /// Fetch historical offers only.
    HistoricalOnly,
    /// Fetch all offers.
    All,
}
