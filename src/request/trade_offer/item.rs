use crate::inventory::InventoryItem;
use crate::response::Asset;
use crate::types::{AppId, ContextId, AssetId, Amount};
use crate::serialize;
use serde::{Serialize, Deserialize};

/// An item to send in a trade offer.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct NewTradeOfferItem {
    /// The app ID e.g. `440` for Team Fortress 2.
    pub appid: AppId,
    /// The context ID.
    #[serde(with = "serialize::string")]
    pub contextid: ContextId,
    /// The unique asset ID. This value is unique to the item's `appid` and `contextid`.
    #[serde(with = "serialize::string")]
    pub assetid: AssetId,
    /// The amount. If this item is not stackable the amount will be `1`.
    pub amount: Amount,
}

impl NewTradeOfferItem {
    /// Creates an item from an item loaded from an inventory of `appid`. Returns `None` if the
    /// item is missing its asset ID or context ID.
    pub fn from_inventory_item(
        appid: AppId,
        item: &InventoryItem,
    ) -> Option<Self> {
        Some(Self {
            appid,
            contextid: item.contextid()?,
            assetid: item.id()?,
            amount: item.amount(),
        })
    }
}

impl From<&Asset> for NewTradeOfferItem {
    fn from(asset: &Asset) -> NewTradeOfferItem {
        NewTradeOfferItem {
            appid: asset.appid,
            contextid: asset.contextid,
            assetid: asset.assetid,
            amount: asset.amount,
        }
    }
}
