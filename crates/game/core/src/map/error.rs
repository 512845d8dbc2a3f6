//! Map construction errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EnemyKind, World};

/// Errors raised while building, editing or closing the map.
///
/// A failed operation leaves the map exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapError {
    /// The ordinal does not name a pair (or insertion point) of the map.
    #[error("position {position} is not valid (1-{max})")]
    InvalidPosition { position: usize, max: usize },

    /// The map has no zones to operate on.
    #[error("the map has no zones")]
    EmptyMap,

    /// Growing the zone arena failed; the build step was abandoned.
    #[error("allocation failed while building the map")]
    AllocationFailure,

    /// Closing requires enough pairs and exactly one strongest enemy.
    #[error("map not ready: {pairs} zones (need {min}), {strongest} strongest enemies (need 1)")]
    MapNotReady {
        pairs: usize,
        min: usize,
        strongest: usize,
    },

    /// The map is closed and can no longer be edited.
    #[error("the map is closed")]
    MapClosed,

    /// The enemy tier does not belong to the target world.
    #[error("{enemy} cannot be placed in the {world}")]
    EnemyNotAllowed { enemy: EnemyKind, world: World },

    /// A second strongest enemy was requested.
    #[error("the strongest enemy is already placed")]
    StrongestAlreadyPlaced,
}

impl GameError for MapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AllocationFailure => ErrorSeverity::Fatal,
            Self::MapNotReady { .. } | Self::MapClosed | Self::EmptyMap => {
                ErrorSeverity::Recoverable
            }
            Self::InvalidPosition { .. }
            | Self::EnemyNotAllowed { .. }
            | Self::StrongestAlreadyPlaced => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPosition { .. } => "INVALID_POSITION",
            Self::EmptyMap => "EMPTY_MAP",
            Self::AllocationFailure => "ALLOCATION_FAILURE",
            Self::MapNotReady { .. } => "MAP_NOT_READY",
            Self::MapClosed => "MAP_CLOSED",
            Self::EnemyNotAllowed { .. } => "ENEMY_NOT_ALLOWED",
            Self::StrongestAlreadyPlaced => "STRONGEST_ALREADY_PLACED",
        }
    }
}
