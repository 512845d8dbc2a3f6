//! The dual-world map.
//!
//! [`ZoneStore`] owns the two positionally-paired sequences; [`GameMap`]
//! adds the open/closed phase; [`MapBuilder`] performs generation and the
//! interactive edits allowed while the map is open.

mod builder;
mod error;
mod generate;
mod store;

pub use builder::{MapBuilder, PairView};
pub use error::MapError;
pub use generate::{roll_item, roll_real_enemy, roll_upside_enemy, roll_zone_kind};
pub use store::{PairIter, PositionRepair, ZoneStore};

use core::fmt;

use crate::config::GameConfig;
use crate::state::{RealZone, UpsideZone, World};

/// Stable arena index of a mirrored pair.
///
/// Identifies the Real World zone and the Upside Down zone at the same
/// ordinal; the world picks the half.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairId(pub u32);

impl PairId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether the map may still be edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapPhase {
    #[default]
    Open,
    Closed,
}

/// One zone of either world, by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneView {
    Real(RealZone),
    UpsideDown(UpsideZone),
}

impl fmt::Display for ZoneView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(zone) => zone.fmt(f),
            Self::UpsideDown(zone) => zone.fmt(f),
        }
    }
}

/// The zone sequences plus their construction phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameMap {
    store: ZoneStore,
    phase: MapPhase,
}

impl GameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &ZoneStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut ZoneStore {
        &mut self.store
    }

    pub fn phase(&self) -> MapPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == MapPhase::Closed
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The zone of `world` at `pair`.
    pub fn zone(&self, world: World, pair: PairId) -> Option<ZoneView> {
        match world {
            World::Real => self.store.real(pair).copied().map(ZoneView::Real),
            World::UpsideDown => self.store.upside(pair).copied().map(ZoneView::UpsideDown),
        }
    }

    /// Whether the closing rules hold: enough pairs, exactly one strongest enemy.
    pub fn check_ready(&self) -> Result<(), MapError> {
        let pairs = self.store.len();
        let strongest = self.store.strongest_count();
        if pairs < GameConfig::MIN_CLOSED_PAIRS || strongest != 1 {
            return Err(MapError::MapNotReady {
                pairs,
                min: GameConfig::MIN_CLOSED_PAIRS,
                strongest,
            });
        }
        Ok(())
    }

    /// Replaces the contents wholesale and reopens the map.
    pub(crate) fn replace(&mut self, store: ZoneStore) {
        self.store = store;
        self.phase = MapPhase::Open;
    }

    pub(crate) fn set_phase(&mut self, phase: MapPhase) {
        self.phase = phase;
    }

    /// Discards every zone and reopens the map.
    pub fn teardown(&mut self) {
        self.store.clear();
        self.phase = MapPhase::Open;
    }
}
