//! Player state: stats, world and position.

use core::fmt;

use crate::config::GameConfig;
use crate::inventory::Inventory;
use crate::map::PairId;

use super::World;

/// A stat value clamped to `[STAT_MIN, STAT_MAX]`.
///
/// The clamp is enforced by construction, so no sequence of bonuses or
/// penalties can move a stat outside the legal range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat(i32);

impl Stat {
    pub const MIN: Self = Self(GameConfig::STAT_MIN);
    pub const MAX: Self = Self(GameConfig::STAT_MAX);

    /// Creates a stat, clamping `value` into the legal range.
    pub const fn new(value: i32) -> Self {
        let clamped = if value < GameConfig::STAT_MIN {
            GameConfig::STAT_MIN
        } else if value > GameConfig::STAT_MAX {
            GameConfig::STAT_MAX
        } else {
            value
        };
        Self(clamped)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Adds `delta` (which may be negative) and clamps the result.
    #[must_use]
    pub const fn offset(self, delta: i32) -> Self {
        Self::new(self.0.saturating_add(delta))
    }
}

impl Default for Stat {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three player stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub attack: Stat,
    pub defense: Stat,
    pub luck: Stat,
}

impl Stats {
    pub fn new(attack: i32, defense: i32, luck: i32) -> Self {
        Self {
            attack: Stat::new(attack),
            defense: Stat::new(defense),
            luck: Stat::new(luck),
        }
    }

    /// All three stats set to the same value.
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value)
    }

    /// Player HP at the start of an encounter.
    pub fn encounter_hp(&self) -> i32 {
        GameConfig::BASE_HP + self.defense.get()
    }

    /// Whether a luck-check roll succeeds (`roll <= luck`).
    pub fn luck_check(&self, roll: u32) -> bool {
        i64::from(roll) <= i64::from(self.luck.get())
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attack={} defense={} luck={}",
            self.attack, self.defense, self.luck
        )
    }
}

/// Index of a player in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Whether a player still takes turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerStatus {
    #[default]
    Active,
    Eliminated,
}

/// A participant of the match.
///
/// `position` is the pair the player stands on; the world decides which half
/// of the pair is the current zone. `None` means the player has not been
/// placed yet, or the map ran out of zones.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub world: World,
    pub position: Option<PairId>,
    pub stats: Stats,
    pub inventory: Inventory,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            name: name.into(),
            world: World::Real,
            position: None,
            stats,
            inventory: Inventory::empty(),
            status: PlayerStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Puts the player on `pair` in the Real World.
    pub fn place(&mut self, pair: Option<PairId>) {
        self.world = World::Real;
        self.position = pair;
    }
}
