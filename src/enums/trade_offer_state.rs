use num_enum::{TryFromPrimitive, IntoPrimitive};
use serde_repr::{Serialize_repr, Deserialize_repr};
use strum_macros::{Display, EnumString};

/// The state of a trade offer as reported by the Web API.
#[derive(Serialize_repr, Deserialize_repr, Display, EnumString, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive, Clone, Copy)]
#[repr(u8)]
pub enum TradeOfferState {
    Invalid = 1,
    Active = 2,
    Accepted = 3,
    Countered = 4,
    Expired = 5,
    Canceled = 6,
    Declined = 7,
    InvalidItems = 8,
    CreatedNeedsConfirmation = 9,
    CanceledBySecondFactor = 10,
    InEscrow = 11,
}

impl TradeOfferState {
    /// Whether an offer in this state can still be accepted, declined or canceled.
    pub fn is_changeable(&self) -> bool {
        matches!(
            self,
            Self::Active |
            Self::InEscrow |
            Self::CreatedNeedsConfirmation
        )
    }
}
