//! Match orchestration.
//!
//! The [`MatchEngine`] borrows the caller's [`GameState`] and RNG for the
//! length of one match. Each round shuffles the active players; each player
//! then plays a full turn, a small state machine ([`TurnState`]) that allows
//! at most one move plus any number of free actions. The match ends as soon
//! as someone defeats the strongest enemy, or when nobody is left.

mod controller;
mod error;
mod status;
mod turn;

pub use controller::{MatchController, MatchOutcome, TurnView};
pub use error::{MatchError, TurnError};
pub use status::{player_status, zone_status};
pub use turn::{ActionEffect, ActionReport, TurnAction, TurnState};

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::{RngOracle, shuffle};
use crate::state::{GameState, PlayerId, World};

/// Runs one match over a closed map.
pub struct MatchEngine<'a, R: RngOracle + ?Sized> {
    state: &'a mut GameState,
    rng: &'a mut R,
    winner: Option<PlayerId>,
    round: u32,
}

impl<'a, R: RngOracle + ?Sized> MatchEngine<'a, R> {
    /// Checks that the game is set up and puts every active player on the
    /// first Real World zone.
    ///
    /// The map must still satisfy the closing rules, so a map whose strongest
    /// enemy despawned in an earlier match cannot be replayed.
    pub fn start(state: &'a mut GameState, rng: &'a mut R) -> Result<Self, MatchError> {
        if !state.map.is_closed() {
            return Err(MatchError::MapOpen);
        }
        let head = state
            .map
            .store()
            .head(World::Real)
            .ok_or(MatchError::EmptyMap)?;
        state.map.check_ready().map_err(MatchError::MapNotReady)?;
        if state.roster.active_count() == 0 {
            return Err(MatchError::NoPlayers);
        }

        for player in state.roster.players_mut().filter(|player| player.is_active()) {
            player.place(Some(head));
        }
        tracing::debug!(players = state.roster.active_count(), "match started");

        Ok(Self {
            state,
            rng,
            winner: None,
            round: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.state.roster.active_count() == 0
    }

    /// Starts the next round and returns its turn order: the active players
    /// in a uniformly random permutation.
    pub fn next_round(&mut self) -> ArrayVec<PlayerId, { GameConfig::MAX_PLAYERS }> {
        self.round += 1;
        let mut order = self.state.roster.active_ids();
        shuffle(&mut *self.rng, &mut order);
        tracing::debug!(round = self.round, ?order, "round started");
        order
    }

    /// Plays a whole turn for `id`, asking `controller` for every action.
    pub fn play_turn<C>(&mut self, id: PlayerId, controller: &mut C)
    where
        C: MatchController + ?Sized,
    {
        let mut turn = TurnState::new(id);
        while !turn.is_over() && !self.is_over() && !controller.abandoned() {
            let Some(player) = self.state.roster.get(id).filter(|player| player.is_active()) else {
                return;
            };
            let view = TurnView {
                round: self.round,
                player_id: id,
                player,
                turn: &turn,
            };
            let action = controller.choose_turn_action(&view);
            let result = self.perform(&mut turn, action, controller);
            if let Some(player) = self.state.roster.get(id) {
                controller.action_resolved(player, action, &result);
            }
        }
    }

    /// Plays rounds until the match is decided.
    pub fn run<C>(mut self, controller: &mut C) -> MatchOutcome
    where
        C: MatchController + ?Sized,
    {
        while !self.is_over() && !controller.abandoned() {
            let order = self.next_round();
            controller.round_started(self.round, &order);
            for id in order {
                if self.is_over() || controller.abandoned() {
                    break;
                }
                self.play_turn(id, controller);
            }
        }

        let outcome = self.outcome();
        tracing::debug!(rounds = self.round, %outcome, "match concluded");
        outcome
    }

    /// How the match stands once it has stopped.
    ///
    /// Anything short of a winner or a wiped-out roster counts as abandoned.
    pub fn outcome(&self) -> MatchOutcome {
        if let Some(id) = self.winner {
            let name = self
                .state
                .roster
                .get(id)
                .map(|player| player.name.clone())
                .unwrap_or_default();
            return MatchOutcome::Winner { player: id, name };
        }
        if self.state.roster.active_count() == 0 {
            MatchOutcome::NoWinner
        } else {
            MatchOutcome::Abandoned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::error::GameError;
    use crate::map::{MapBuilder, MapError};
    use crate::state::{PlayerDraft, Tradeoff};

    fn closed_state(players: usize) -> GameState {
        let mut state = GameState::new();
        let mut rng = ScriptedRng::constant(1);
        let mut builder = MapBuilder::new(&mut state.map);
        builder.generate(&mut rng).unwrap();
        builder.close().unwrap();
        for index in 0..players {
            let draft = PlayerDraft::with_base(&format!("p{index}"), 10);
            state.roster.enlist(&draft, Tradeoff::Balanced, false).unwrap();
        }
        state
    }

    #[test]
    fn start_requires_a_closed_map_and_players() {
        let mut rng = ScriptedRng::constant(1);

        let mut open = GameState::new();
        assert_eq!(
            MatchEngine::start(&mut open, &mut rng).err(),
            Some(MatchError::MapOpen)
        );

        let mut empty = closed_state(0);
        assert_eq!(
            MatchEngine::start(&mut empty, &mut rng).err(),
            Some(MatchError::NoPlayers)
        );
    }

    #[test]
    fn start_refuses_a_map_without_its_strongest_enemy() {
        let mut state = closed_state(1);
        let store = state.map.store_mut();
        let ids: Vec<_> = store.iter(World::UpsideDown).collect();
        for id in ids {
            if let Some(zone) = store.upside_mut(id) {
                zone.enemy = None;
            }
        }

        let mut rng = ScriptedRng::constant(1);
        let err = MatchEngine::start(&mut state, &mut rng).err();
        assert_eq!(
            err,
            Some(MatchError::MapNotReady(MapError::MapNotReady {
                pairs: GameConfig::GENERATED_PAIRS,
                min: GameConfig::MIN_CLOSED_PAIRS,
                strongest: 0
            }))
        );
        assert_eq!(err.map(|err| err.error_code()), Some("MATCH_NOT_READY"));
        assert!(state.roster.iter().all(|(_, player)| player.position.is_none()));
    }

    #[test]
    fn start_places_everyone_at_the_real_head() {
        let mut state = closed_state(3);
        let head = state.map.store().head(World::Real);
        let mut rng = ScriptedRng::constant(1);
        let engine = MatchEngine::start(&mut state, &mut rng).unwrap();

        for (_, player) in engine.state().roster.iter() {
            assert_eq!(player.position, head);
            assert_eq!(player.world, World::Real);
        }
    }

    #[test]
    fn rounds_shuffle_only_active_players() {
        let mut state = closed_state(3);
        state.roster.eliminate(PlayerId(1));
        // Fisher-Yates over two players: one draw of 0 swaps them.
        let mut rng = ScriptedRng::new([0]);
        let mut engine = MatchEngine::start(&mut state, &mut rng).unwrap();

        let order = engine.next_round();
        assert_eq!(order.as_slice(), &[PlayerId(2), PlayerId(0)]);
        assert_eq!(engine.round(), 1);
    }
}
