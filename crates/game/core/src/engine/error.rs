//! Match and turn errors.

use crate::error::{ErrorSeverity, GameError};
use crate::inventory::InventoryError;
use crate::map::MapError;

/// Why a match cannot start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchError {
    #[error("the game is not set up: the map must be closed first")]
    MapOpen,

    #[error("the game is not set up: the map has no zones")]
    EmptyMap,

    /// The closed map lost what made it playable, such as a strongest enemy
    /// that despawned in an earlier match.
    #[error("the game is not set up: {0}")]
    MapNotReady(MapError),

    #[error("the game is not set up: no players are left")]
    NoPlayers,
}

impl GameError for MatchError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "MATCH_NOT_READY"
    }
}

/// A turn action that was refused.
///
/// A refused action changes nothing and leaves the turn open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("you already moved this turn")]
    AlreadyMoved,

    #[error("you cannot advance any further")]
    AtTail,

    #[error("you cannot retreat any further")]
    AtHead,

    #[error("you are not standing on any zone")]
    NotPlaced,

    #[error("this player has been eliminated")]
    Eliminated,

    #[error("the turn is already over")]
    TurnOver,

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyMoved | Self::AtTail | Self::AtHead | Self::TurnOver => {
                ErrorSeverity::Recoverable
            }
            Self::NotPlaced | Self::Eliminated => ErrorSeverity::Internal,
            Self::Inventory(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyMoved => "ALREADY_MOVED",
            Self::AtTail => "AT_TAIL",
            Self::AtHead => "AT_HEAD",
            Self::NotPlaced => "NOT_PLACED",
            Self::Eliminated => "ELIMINATED",
            Self::TurnOver => "TURN_OVER",
            Self::Inventory(err) => err.error_code(),
        }
    }
}
