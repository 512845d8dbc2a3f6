//! Match history kept for the credits screen.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Name recorded when a match ends without a winner.
pub const NO_WINNER: &str = "Nobody";

/// Last winners and the number of completed matches.
///
/// Lives for the whole process, across any number of setups.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord {
    recent_winners: ArrayVec<String, { GameConfig::RECENT_WINNERS }>,
    games_played: u32,
}

impl MatchRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one completed match, dropping the oldest winner when full.
    pub fn record(&mut self, winner: Option<&str>) {
        if self.recent_winners.is_full() {
            self.recent_winners.remove(0);
        }
        self.recent_winners
            .push(winner.unwrap_or(NO_WINNER).to_owned());
        self.games_played = self.games_played.saturating_add(1);
    }

    /// Oldest first.
    pub fn recent_winners(&self) -> &[String] {
        &self.recent_winners
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }
}
