//! One fight between a player and the enemy of a zone.

use core::fmt;

use crate::env::RngOracle;
use crate::inventory::{EffectContext, InventoryError, ItemEffect, apply_item};
use crate::state::{EnemyKind, Player, Stats};

use super::{EnemyProfile, Strike, enemy_strike, player_strike};

/// Encounter lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterState {
    Active,
    PlayerDefeated,
    EnemyDefeated,
    /// The zone was empty; nothing happened.
    NoEnemyPresent,
}

impl EncounterState {
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Active)
    }
}

/// What the player does in one exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    Attack,
    /// Use the item in the one-based inventory `slot`.
    UseItem { slot: usize },
}

/// How the player's half of an exchange went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opening {
    Strike(Strike),
    Item(ItemEffect),
    /// The chosen slot could not be used; the action is lost.
    Forfeit(InventoryError),
}

impl fmt::Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strike(strike) => write!(f, "You attack: {strike}."),
            Self::Item(effect) => effect.fmt(f),
            Self::Forfeit(err) => write!(f, "You fumble ({err}) and lose your action."),
        }
    }
}

/// One player action and the enemy's answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub opening: Opening,
    /// `None` when the opening already defeated the enemy.
    pub retaliation: Option<Strike>,
    pub enemy_hp: i32,
    pub player_hp: i32,
    pub state: EncounterState,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opening)?;
        if let Some(strike) = self.retaliation {
            write!(f, "\nThe enemy strikes back: {strike}.")?;
        }
        write!(f, "\nEnemy HP {} | your HP {}", self.enemy_hp, self.player_hp)
    }
}

/// Encounter state machine.
///
/// Created from the zone's current enemy tag and the player's stats at the
/// start of the fight; the player always acts first in each exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encounter {
    enemy: Option<EnemyKind>,
    profile: Option<EnemyProfile>,
    enemy_hp: i32,
    player_hp: i32,
    state: EncounterState,
}

impl Encounter {
    pub fn begin(enemy: Option<EnemyKind>, stats: &Stats) -> Self {
        let profile = enemy.map(EnemyProfile::of);
        Self {
            enemy,
            profile,
            enemy_hp: profile.map_or(0, |profile| profile.hp),
            player_hp: stats.encounter_hp(),
            state: if enemy.is_some() {
                EncounterState::Active
            } else {
                EncounterState::NoEnemyPresent
            },
        }
    }

    pub fn enemy(&self) -> Option<EnemyKind> {
        self.enemy
    }

    pub fn enemy_hp(&self) -> i32 {
        self.enemy_hp
    }

    pub fn player_hp(&self) -> i32 {
        self.player_hp
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    /// Plays one exchange. Returns `None` once the encounter is over.
    pub fn exchange(
        &mut self,
        action: CombatAction,
        player: &mut Player,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Option<Exchange> {
        let profile = self.profile.filter(|_| self.state == EncounterState::Active)?;

        let opening = match action {
            CombatAction::Attack => {
                let strike = player_strike(&player.stats, &profile, rng);
                self.enemy_hp -= strike.damage();
                Opening::Strike(strike)
            }
            CombatAction::UseItem { slot } => match player.inventory.take(slot) {
                Ok(item) => Opening::Item(apply_item(
                    item,
                    &mut player.stats,
                    EffectContext::Combat {
                        enemy_hp: &mut self.enemy_hp,
                    },
                )),
                Err(err) => Opening::Forfeit(err),
            },
        };

        let retaliation = if self.enemy_hp <= 0 {
            self.state = EncounterState::EnemyDefeated;
            None
        } else {
            let strike = enemy_strike(&profile, &player.stats, rng);
            self.player_hp -= strike.damage();
            if self.player_hp <= 0 {
                self.state = EncounterState::PlayerDefeated;
            }
            Some(strike)
        };

        Some(Exchange {
            opening,
            retaliation,
            enemy_hp: self.enemy_hp,
            player_hp: self.player_hp,
            state: self.state,
        })
    }
}
