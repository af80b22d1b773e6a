use crate::types::{AppId, ContextId, AssetId, Amount, ClassId, InstanceId};
use crate::serialize::{string, option_string_0_as_none};
use serde::{Serialize, Deserialize};

/// An item in a trade offer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub appid: AppId,
    #[serde(with = "string")]
    pub contextid: ContextId,
    #[serde(with = "string")]
    pub assetid: AssetId,
    #[serde(with = "string")]
    pub classid: ClassId,
    #[serde(default, with = "option_string_0_as_none")]
    pub instanceid: InstanceId,
    #[serde(with = "string")]
    pub amount: Amount,
    /// Whether the item is no longer in the inventory it was offered from.
    #[serde(default)]
    pub missing: bool,
}
