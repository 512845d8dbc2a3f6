//! Game state: zone tags, players and the match record.
//!
//! [`GameState`] is owned by the caller and lent to the map builder and the
//! match engine in turn; nothing here is process-global.
mod player;
mod record;
mod roster;
mod zone;

pub use player::{Player, PlayerId, PlayerStatus, Stat, Stats};
pub use record::{MatchRecord, NO_WINNER};
pub use roster::{PlayerDraft, Roster, SetupError, Tradeoff};
pub use zone::{
    EnemyKind, ItemKind, RealZone, UpsideZone, World, ZoneKind, enemy_label, item_label,
};

use crate::map::GameMap;

/// Everything a match mutates: the map and the players on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    pub map: GameMap,
    pub roster: Roster,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the map and every player, ready for a new setup.
    pub fn teardown(&mut self) {
        self.map.teardown();
        self.roster = Roster::new();
        tracing::debug!("game state torn down");
    }
}
