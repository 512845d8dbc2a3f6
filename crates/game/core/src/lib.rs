//! Deterministic rules of the otherside adventure game.
//!
//! `otherside-core` owns everything with an invariant: the mirrored zone map
//! of the Real World and the Upside Down, the combat resolution, items, and
//! the round/turn state machine of a match. It performs no I/O; the console
//! shell feeds it decisions through [`engine::MatchController`] and prints
//! the strings and reports it hands back. Every random draw goes through
//! [`env::RngOracle`], so any outcome can be replayed from a script.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod inventory;
pub mod map;
pub mod state;

pub use combat::{CombatAction, CombatDecider, CombatOutcome, Encounter, EncounterState, Exchange};
pub use config::GameConfig;
pub use engine::{
    ActionEffect, ActionReport, MatchController, MatchEngine, MatchError, MatchOutcome,
    TurnAction, TurnError, TurnState, TurnView,
};
pub use env::{PcgRng, RngOracle, ScriptedRng};
pub use error::{ErrorSeverity, GameError, RangeError};
pub use inventory::{Inventory, InventoryError, ItemEffect};
pub use map::{GameMap, MapBuilder, MapError, PairId, PairView, ZoneView};
pub use state::{
    EnemyKind, GameState, ItemKind, MatchRecord, Player, PlayerDraft, PlayerId, Roster,
    SetupError, Stats, Tradeoff, World, ZoneKind,
};
