//! The seam between the match engine and whoever makes the decisions.

use core::fmt;

use crate::combat::CombatDecider;
use crate::state::{Player, PlayerId};

use super::{ActionReport, TurnAction, TurnError, TurnState};

/// What the controller sees when asked for the next action.
#[derive(Clone, Copy, Debug)]
pub struct TurnView<'s> {
    pub round: u32,
    pub player_id: PlayerId,
    pub player: &'s Player,
    pub turn: &'s TurnState,
}

/// Drives a match: picks turn and combat actions and receives the results.
///
/// A controller that reports [`CombatDecider::abandoned`] stops the match.
///
/// The console shell implements this over stdin/stdout; tests implement it
/// with scripted actions.
pub trait MatchController: CombatDecider {
    fn choose_turn_action(&mut self, view: &TurnView<'_>) -> TurnAction;

    /// Called once per round with the shuffled turn order.
    fn round_started(&mut self, _round: u32, _order: &[PlayerId]) {}

    /// Called after every turn action, accepted or refused.
    fn action_resolved(
        &mut self,
        _player: &Player,
        _action: TurnAction,
        _result: &Result<ActionReport, TurnError>,
    ) {
    }
}

/// How a match ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner { player: PlayerId, name: String },
    /// Every player was eliminated.
    NoWinner,
    /// The controller gave up before the match was decided.
    Abandoned,
}

impl MatchOutcome {
    pub fn winner_name(&self) -> Option<&str> {
        match self {
            Self::Winner { name, .. } => Some(name),
            Self::NoWinner | Self::Abandoned => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner { name, .. } => write!(f, "The winner is {name}!"),
            Self::NoWinner => f.write_str("Every player has fallen. Nobody wins."),
            Self::Abandoned => f.write_str("The match was abandoned."),
        }
    }
}
