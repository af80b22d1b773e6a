use crate::SteamID;
use crate::enums::Language;
use crate::types::{AppId, ContextId, TradeOfferId};

/// Options for loading your own inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadInventoryOptions {
    /// App ID of inventory.
    pub appid: AppId,
    /// Context ID of inventory.
    pub contextid: ContextId,
    /// Whether to fetch only tradable items. Defaults to `true`.
    pub tradable_only: bool,
    /// The language to use for descriptions. Falls back to the language the API was built
    /// with.
    pub language: Option<Language>,
}

impl LoadInventoryOptions {
    /// Creates a new [`LoadInventoryOptions`] loading tradable items only.
    pub fn new(
        appid: AppId,
        contextid: ContextId,
    ) -> Self {
        Self {
            appid,
            contextid,
            tradable_only: true,
            language: None,
        }
    }

    /// Whether to fetch only tradable items.
    pub fn tradable_only(mut self, tradable_only: bool) -> Self {
        self.tradable_only = tradable_only;
        self
    }

    /// The language to use for descriptions.
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}

/// Options for loading a trade partner's inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPartnerInventoryOptions {
    /// The partner's Steam ID.
    pub partner: SteamID,
    /// App ID of inventory.
    pub appid: AppId,
    /// Context ID of inventory.
    pub contextid: ContextId,
    /// The offer the inventory is loaded for. Inventories for new offers are loaded when this
    /// is `None`.
    pub tradeofferid: Option<TradeOfferId>,
    /// The language to use for descriptions. Falls back to the language the API was built
    /// with.
    pub language: Option<Language>,
}

impl LoadPartnerInventoryOptions {
    /// Creates a new [`LoadPartnerInventoryOptions`] for a new offer.
    pub fn new(
        partner: SteamID,
        appid: AppId,
        contextid: ContextId,
    ) -> Self {
        Self {
            partner,
            appid,
            contextid,
            tradeofferid: None,
            language: None,
        }
    }

    /// The existing offer the inventory is loaded for.
    pub fn tradeofferid(mut self, tradeofferid: TradeOfferId) -> Self {
        self.tradeofferid = Some(tradeofferid);
        self
    }

    /// The language to use for descriptions.
    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }
}
