//! Player roster and character creation.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError, RangeError};
use crate::map::{PairId, PositionRepair};

use super::{Player, PlayerId, PlayerStatus, Stats};

/// Errors raised while enlisting players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("the roster is full ({max} players)")]
    RosterFull { max: usize },

    #[error("the special variant has already been claimed")]
    SpecialVariantTaken,

    #[error(transparent)]
    OutOfRange(#[from] RangeError),
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RosterFull { .. } | Self::SpecialVariantTaken => ErrorSeverity::Recoverable,
            Self::OutOfRange(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RosterFull { .. } => "ROSTER_FULL",
            Self::SpecialVariantTaken => "SPECIAL_VARIANT_TAKEN",
            Self::OutOfRange(err) => err.error_code(),
        }
    }
}

/// One-time stat trade-off picked at character creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tradeoff {
    /// +3 attack, -3 defense.
    Offensive,
    /// +3 defense, -3 attack.
    Defensive,
    #[default]
    Balanced,
}

impl Tradeoff {
    /// Menu choice `1..=3` in the order offensive, defensive, balanced.
    pub fn from_choice(choice: i64) -> Result<Self, RangeError> {
        match RangeError::check(choice, 1..=3)? {
            1 => Ok(Self::Offensive),
            2 => Ok(Self::Defensive),
            _ => Ok(Self::Balanced),
        }
    }

    /// `(attack delta, defense delta)`.
    pub const fn deltas(self) -> (i32, i32) {
        match self {
            Self::Offensive => (GameConfig::TRADEOFF_DELTA, -GameConfig::TRADEOFF_DELTA),
            Self::Defensive => (-GameConfig::TRADEOFF_DELTA, GameConfig::TRADEOFF_DELTA),
            Self::Balanced => (0, 0),
        }
    }
}

/// A character between the base roll and enlistment.
///
/// The base roll is shown to the player before they pick a trade-off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerDraft {
    name: String,
    base_roll: i32,
}

impl PlayerDraft {
    /// Rolls one d20 that seeds all three stats.
    pub fn roll(name: &str, rng: &mut (impl RngOracle + ?Sized)) -> Self {
        Self::with_base(name, rng.roll_d20() as i32)
    }

    pub fn with_base(name: &str, base_roll: i32) -> Self {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            GameConfig::DEFAULT_PLAYER_NAME
        } else {
            trimmed
        };
        Self {
            name: name.to_owned(),
            base_roll,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_roll(&self) -> i32 {
        self.base_roll
    }

    /// Final stats: base roll, then trade-off, then the special variant,
    /// clamped once at the end.
    pub fn stats(&self, tradeoff: Tradeoff, special: bool) -> Stats {
        let (attack_delta, defense_delta) = tradeoff.deltas();
        let mut attack = self.base_roll + attack_delta;
        let mut defense = self.base_roll + defense_delta;
        let mut luck = self.base_roll;
        if special {
            attack += GameConfig::SPECIAL_ATTACK_BONUS;
            defense += GameConfig::SPECIAL_DEFENSE_BONUS;
            luck -= GameConfig::SPECIAL_LUCK_PENALTY;
        }
        Stats::new(attack, defense, luck)
    }

    fn display_name(&self, special: bool) -> String {
        let full = if special {
            format!("{}{}", GameConfig::SPECIAL_VARIANT_PREFIX, self.name)
        } else {
            self.name.clone()
        };
        full.chars().take(GameConfig::MAX_NAME_LEN).collect()
    }
}

/// Players of the current setup.
///
/// Eliminated players keep their slot with [`PlayerStatus::Eliminated`] so
/// player ids stay stable for the whole match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    players: ArrayVec<Player, { GameConfig::MAX_PLAYERS }>,
    special_claimed: bool,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a requested player count.
    pub fn check_count(count: i64) -> Result<usize, RangeError> {
        RangeError::check(count, 1..=GameConfig::MAX_PLAYERS as i64).map(|count| count as usize)
    }

    /// Whether the special variant can still be claimed in this setup.
    pub fn special_available(&self) -> bool {
        !self.special_claimed
    }

    /// Turns a draft into a player.
    pub fn enlist(
        &mut self,
        draft: &PlayerDraft,
        tradeoff: Tradeoff,
        special: bool,
    ) -> Result<PlayerId, SetupError> {
        if self.players.is_full() {
            return Err(SetupError::RosterFull {
                max: GameConfig::MAX_PLAYERS,
            });
        }
        if special && self.special_claimed {
            return Err(SetupError::SpecialVariantTaken);
        }

        let player = Player::new(draft.display_name(special), draft.stats(tradeoff, special));
        let id = PlayerId(self.players.len() as u8);
        tracing::debug!(player = %player.name, stats = %player.stats, "player enlisted");
        self.players.push(player);
        self.special_claimed |= special;
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &Player)> {
        self.players
            .iter()
            .enumerate()
            .map(|(index, player)| (PlayerId(index as u8), player))
    }

    pub(crate) fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Ids of players still in the match, in roster order.
    pub fn active_ids(&self) -> ArrayVec<PlayerId, { GameConfig::MAX_PLAYERS }> {
        self.iter()
            .filter(|(_, player)| player.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|player| player.is_active()).count()
    }

    /// Removes a player from the match for good.
    pub fn eliminate(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(id.index()) {
            player.status = PlayerStatus::Eliminated;
            player.position = None;
            tracing::debug!(player = %player.name, "player eliminated");
        }
    }
}

impl PositionRepair for Roster {
    fn relocate(&mut self, removed: PairId, head: Option<PairId>) {
        for player in self.players_mut() {
            if player.position == Some(removed) {
                player.position = head;
            }
        }
    }
}
