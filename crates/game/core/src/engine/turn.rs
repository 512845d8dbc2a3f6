//! The per-turn state machine.

use core::fmt;

use crate::combat::{self, CombatDecider, CombatOutcome};
use crate::env::RngOracle;
use crate::inventory::{self, EffectContext, ItemEffect, apply_item};
use crate::state::{GameState, ItemKind, Player, PlayerId, World};

use super::status::{player_status, zone_status};
use super::{MatchEngine, TurnError};

/// Per-turn bookkeeping.
///
/// `moved` becomes true after the first successful advance, retreat or
/// switch into the Upside Down, and blocks the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnState {
    player: PlayerId,
    moved: bool,
    over: bool,
}

impl TurnState {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            moved: false,
            over: false,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    fn end(&mut self) {
        self.over = true;
    }
}

/// Actions offered by the turn menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAction {
    Advance,
    Retreat,
    SwitchWorld,
    Fight,
    ShowPlayer,
    ShowZone,
    CollectItem,
    /// One-based inventory slot.
    UseItem { slot: usize },
    EndTurn,
}

/// What an accepted action did besides any combat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionEffect {
    None,
    Moved { world: World, ordinal: usize },
    /// The combat took place but the move itself was impossible.
    Blocked(TurnError),
    SwitchFailed { roll: u32, luck: i32 },
    ItemCollected(ItemKind),
    ItemUsed(ItemEffect),
    Status(String),
    TurnEnded,
}

impl fmt::Display for ActionEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Moved { world, ordinal } => write!(f, "You are now in the {world}, zone {ordinal}."),
            Self::Blocked(err) => write!(f, "{}.", capitalize(&err.to_string())),
            Self::SwitchFailed { roll, luck } => {
                write!(f, "The gate stays shut (roll {roll}, luck {luck}).")
            }
            Self::ItemCollected(item) => write!(f, "You picked up {item}."),
            Self::ItemUsed(effect) => effect.fmt(f),
            Self::Status(text) => f.write_str(text),
            Self::TurnEnded => f.write_str("Turn ended."),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Result of an accepted action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    /// The fight this action started, if any.
    pub combat: Option<CombatOutcome>,
    pub effect: ActionEffect,
    /// The player died, won, or ended the turn.
    pub turn_over: bool,
}

impl<R: RngOracle + ?Sized> MatchEngine<'_, R> {
    /// Runs one action for the player whose turn it is.
    ///
    /// A refused action returns an error and leaves both the game and the
    /// turn untouched.
    pub fn perform<D>(
        &mut self,
        turn: &mut TurnState,
        action: TurnAction,
        decider: &mut D,
    ) -> Result<ActionReport, TurnError>
    where
        D: CombatDecider + ?Sized,
    {
        if turn.over || self.winner.is_some() {
            return Err(TurnError::TurnOver);
        }
        let player = self.player(turn.player)?;
        let pair = player.position.ok_or(TurnError::NotPlaced)?;

        let (combat, effect) = match action {
            TurnAction::Advance => self.step(turn, true, decider)?,
            TurnAction::Retreat => self.step(turn, false, decider)?,
            TurnAction::SwitchWorld => self.switch_world(turn, decider)?,
            TurnAction::Fight => (Some(self.engage(turn, decider)?), ActionEffect::None),
            TurnAction::ShowPlayer => (
                None,
                ActionEffect::Status(player_status(player, &self.state.map)),
            ),
            TurnAction::ShowZone => (
                None,
                ActionEffect::Status(zone_status(player, &self.state.map)),
            ),
            TurnAction::CollectItem => {
                let GameState { map, roster } = &mut *self.state;
                let player = roster.get_mut(turn.player).ok_or(TurnError::Eliminated)?;
                let zone = map
                    .store_mut()
                    .real_mut(pair)
                    .ok_or(TurnError::NotPlaced)?;
                let item = inventory::collect_item(player, zone)?;
                (None, ActionEffect::ItemCollected(item))
            }
            TurnAction::UseItem { slot } => {
                let player = self.player_mut(turn.player)?;
                let item = player.inventory.take(slot)?;
                let effect = apply_item(item, &mut player.stats, EffectContext::OutOfCombat);
                tracing::debug!(player = %player.name, %item, "item used");
                (None, ActionEffect::ItemUsed(effect))
            }
            TurnAction::EndTurn => {
                turn.end();
                (None, ActionEffect::TurnEnded)
            }
        };

        Ok(ActionReport {
            combat,
            effect,
            turn_over: turn.over,
        })
    }

    /// Advance (`forward`) or retreat one zone in the current world.
    fn step<D>(
        &mut self,
        turn: &mut TurnState,
        forward: bool,
        decider: &mut D,
    ) -> Result<(Option<CombatOutcome>, ActionEffect), TurnError>
    where
        D: CombatDecider + ?Sized,
    {
        if turn.moved {
            return Err(TurnError::AlreadyMoved);
        }
        let combat = self.engage(turn, decider)?;
        if combat.blocks_move() {
            return Ok((Some(combat), ActionEffect::None));
        }

        let player = self.player(turn.player)?;
        let world = player.world;
        let pair = player.position.ok_or(TurnError::NotPlaced)?;
        let store = self.state.map.store();
        let target = if forward {
            store.next(world, pair)
        } else {
            store.prev(world, pair)
        };
        let Some(target) = target else {
            let blocked = if forward {
                TurnError::AtTail
            } else {
                TurnError::AtHead
            };
            return Ok((Some(combat), ActionEffect::Blocked(blocked)));
        };

        let ordinal = store.ordinal_of(world, target).unwrap_or_default();
        self.player_mut(turn.player)?.position = Some(target);
        turn.moved = true;
        Ok((Some(combat), ActionEffect::Moved { world, ordinal }))
    }

    /// Crosses the mirror at the current ordinal.
    ///
    /// Leaving the Real World needs a d20 strictly below luck and uses up the
    /// turn's move; coming back is free and always succeeds.
    fn switch_world<D>(
        &mut self,
        turn: &mut TurnState,
        decider: &mut D,
    ) -> Result<(Option<CombatOutcome>, ActionEffect), TurnError>
    where
        D: CombatDecider + ?Sized,
    {
        let from = self.player(turn.player)?.world;
        if from == World::Real && turn.moved {
            return Err(TurnError::AlreadyMoved);
        }
        let combat = self.engage(turn, decider)?;
        if combat.blocks_move() {
            return Ok((Some(combat), ActionEffect::None));
        }

        let player = self.player(turn.player)?;
        let luck = player.stats.luck.get();
        let ordinal = player
            .position
            .and_then(|pair| self.state.map.store().ordinal_of(from, pair))
            .unwrap_or_default();

        let effect = match from {
            World::Real => {
                let roll = self.rng.roll_d20();
                if i64::from(roll) < i64::from(luck) {
                    turn.moved = true;
                    self.player_mut(turn.player)?.world = World::UpsideDown;
                    ActionEffect::Moved {
                        world: World::UpsideDown,
                        ordinal,
                    }
                } else {
                    ActionEffect::SwitchFailed { roll, luck }
                }
            }
            World::UpsideDown => {
                self.player_mut(turn.player)?.world = World::Real;
                ActionEffect::Moved {
                    world: World::Real,
                    ordinal,
                }
            }
        };
        Ok((Some(combat), effect))
    }

    /// Fights the enemy of the player's current zone and settles the result.
    fn engage<D>(&mut self, turn: &mut TurnState, decider: &mut D) -> Result<CombatOutcome, TurnError>
    where
        D: CombatDecider + ?Sized,
    {
        let id = turn.player;
        let GameState { map, roster } = &mut *self.state;
        let player = roster.get_mut(id).ok_or(TurnError::Eliminated)?;
        let pair = player.position.ok_or(TurnError::NotPlaced)?;
        let zone_enemy = map
            .store_mut()
            .enemy_mut(player.world, pair)
            .ok_or(TurnError::NotPlaced)?;

        let outcome = combat::fight(player, zone_enemy, decider, &mut *self.rng);
        if outcome.player_defeated() {
            roster.eliminate(id);
            turn.end();
        } else if outcome.wins_match() {
            self.winner = Some(id);
            turn.end();
        }
        Ok(outcome)
    }

    fn player(&self, id: PlayerId) -> Result<&Player, TurnError> {
        self.state
            .roster
            .get(id)
            .filter(|player| player.is_active())
            .ok_or(TurnError::Eliminated)
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, TurnError> {
        self.state
            .roster
            .get_mut(id)
            .filter(|player| player.is_active())
            .ok_or(TurnError::Eliminated)
    }
}
