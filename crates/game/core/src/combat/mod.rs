//! Combat resolution.
//!
//! A fight is an [`Encounter`] driven exchange by exchange until one side
//! falls. The enemy is derived from the zone's tag when the fight starts;
//! afterwards [`fight`] settles the zone: a defeated enemy may leave it for
//! good, and defeating the strongest enemy is reported as a match win.
//!
//! # Draw order
//!
//! ```text
//! player attack:     player d20, enemy d20, [luck d20 if landed]
//! enemy retaliation: enemy d20, player d20, [luck d20 if landed]
//! after a win:       despawn d100
//! ```

mod encounter;
mod enemy;
mod strike;

pub use encounter::{CombatAction, Encounter, EncounterState, Exchange, Opening};
pub use enemy::EnemyProfile;
pub use strike::{Strike, enemy_damage, enemy_strike, player_damage, player_strike};

use core::fmt;

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{EnemyKind, Player};

/// Picks the player's action for each exchange and watches the fight.
pub trait CombatDecider {
    fn choose_combat_action(&mut self, encounter: &Encounter, player: &Player) -> CombatAction;

    /// Called after every exchange.
    fn observe_exchange(&mut self, _exchange: &Exchange) {}

    /// The decider can no longer choose (for example, input was closed).
    /// Checked after every choice: a fight is broken off instead of playing
    /// the chosen action, and a match stops at the next action boundary.
    fn abandoned(&self) -> bool {
        false
    }
}

/// How a fight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    NoEnemy,
    PlayerDefeated { enemy: EnemyKind },
    EnemyDefeated {
        enemy: EnemyKind,
        /// The enemy left the zone for good.
        despawned: bool,
    },
    /// The decider gave up mid-fight; the zone keeps its enemy.
    BrokenOff { enemy: EnemyKind },
}

impl CombatOutcome {
    /// Defeating the strongest enemy wins the match.
    pub const fn wins_match(&self) -> bool {
        matches!(
            self,
            Self::EnemyDefeated {
                enemy: EnemyKind::Strongest,
                ..
            }
        )
    }

    pub const fn player_defeated(&self) -> bool {
        matches!(self, Self::PlayerDefeated { .. })
    }

    /// The player cannot go on with a move after this fight.
    pub const fn blocks_move(&self) -> bool {
        matches!(self, Self::PlayerDefeated { .. } | Self::BrokenOff { .. })
    }
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEnemy => f.write_str("No enemy here."),
            Self::PlayerDefeated { enemy } => write!(f, "You were slain by the {enemy}."),
            Self::EnemyDefeated {
                enemy,
                despawned: true,
            } => write!(f, "The {enemy} is defeated and vanishes from this zone."),
            Self::EnemyDefeated { enemy, .. } => {
                write!(f, "The {enemy} is defeated, but this zone will spawn another.")
            }
            Self::BrokenOff { enemy } => write!(f, "The fight with the {enemy} was broken off."),
        }
    }
}

/// Fights the enemy held in `zone_enemy` to the end.
///
/// On a win the despawn roll may clear `zone_enemy`; otherwise the tag stays
/// and the same enemy spawns again on the next visit. The caller removes a
/// defeated player from the roster.
pub fn fight<R, D>(
    player: &mut Player,
    zone_enemy: &mut Option<EnemyKind>,
    decider: &mut D,
    rng: &mut R,
) -> CombatOutcome
where
    R: RngOracle + ?Sized,
    D: CombatDecider + ?Sized,
{
    let mut encounter = Encounter::begin(*zone_enemy, &player.stats);
    let Some(enemy) = encounter.enemy() else {
        return CombatOutcome::NoEnemy;
    };

    while !encounter.state().is_over() {
        let action = decider.choose_combat_action(&encounter, player);
        if decider.abandoned() {
            tracing::debug!(player = %player.name, enemy = %enemy, "encounter broken off");
            return CombatOutcome::BrokenOff { enemy };
        }
        if let Some(exchange) = encounter.exchange(action, player, rng) {
            decider.observe_exchange(&exchange);
        }
    }

    let outcome = match encounter.state() {
        EncounterState::PlayerDefeated => CombatOutcome::PlayerDefeated { enemy },
        _ => {
            let despawned = rng.roll_d100() <= GameConfig::DESPAWN_CHANCE;
            if despawned {
                *zone_enemy = None;
            }
            CombatOutcome::EnemyDefeated { enemy, despawned }
        }
    };
    tracing::debug!(player = %player.name, enemy = %enemy, ?outcome, "encounter concluded");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::Stats;

    struct AlwaysAttack(usize);

    impl CombatDecider for AlwaysAttack {
        fn choose_combat_action(&mut self, _: &Encounter, _: &Player) -> CombatAction {
            CombatAction::Attack
        }

        fn observe_exchange(&mut self, _: &Exchange) {
            self.0 += 1;
        }
    }

    #[test]
    fn empty_zone_needs_no_draws() {
        let mut player = Player::new("Nancy", Stats::uniform(10));
        let mut zone = None;
        let mut rng = ScriptedRng::new([]);
        let outcome = fight(&mut player, &mut zone, &mut AlwaysAttack(0), &mut rng);
        assert_eq!(outcome, CombatOutcome::NoEnemy);
    }

    #[test]
    fn despawn_roll_decides_whether_the_enemy_returns() {
        // One hit of 2 + 20 / 4 + 2 = 9 cannot kill a weak enemy, so two
        // exchanges; the enemy misses in between.
        let script = [20, 1, 1, 1, 20, 20, 1, 1];

        let mut player = Player::new("Nancy", Stats::uniform(20));
        let mut zone = Some(EnemyKind::Weak);
        let mut rng = ScriptedRng::new(script.into_iter().chain([50]));
        let mut decider = AlwaysAttack(0);
        let outcome = fight(&mut player, &mut zone, &mut decider, &mut rng);
        assert_eq!(
            outcome,
            CombatOutcome::EnemyDefeated {
                enemy: EnemyKind::Weak,
                despawned: true
            }
        );
        assert_eq!(zone, None);
        assert_eq!(decider.0, 2);

        let mut zone = Some(EnemyKind::Weak);
        let mut rng = ScriptedRng::new(script.into_iter().chain([51]));
        let outcome = fight(&mut player, &mut zone, &mut AlwaysAttack(0), &mut rng);
        assert!(!outcome.wins_match());
        assert_eq!(zone, Some(EnemyKind::Weak));
    }

    /// Attacks once, then stops answering.
    struct LeavesAfterOne(usize);

    impl CombatDecider for LeavesAfterOne {
        fn choose_combat_action(&mut self, _: &Encounter, _: &Player) -> CombatAction {
            CombatAction::Attack
        }

        fn observe_exchange(&mut self, _: &Exchange) {
            self.0 += 1;
        }

        fn abandoned(&self) -> bool {
            self.0 >= 1
        }
    }

    #[test]
    fn abandoned_decider_breaks_off_the_fight() {
        let mut player = Player::new("Nancy", Stats::uniform(10));
        let mut zone = Some(EnemyKind::Weak);
        // Both sides miss once; no further draws are taken.
        let mut rng = ScriptedRng::new([1, 20, 1, 20, 99]);
        let mut decider = LeavesAfterOne(0);
        let outcome = fight(&mut player, &mut zone, &mut decider, &mut rng);

        assert_eq!(
            outcome,
            CombatOutcome::BrokenOff {
                enemy: EnemyKind::Weak
            }
        );
        assert!(outcome.blocks_move());
        assert!(!outcome.player_defeated());
        assert_eq!(decider.0, 1);
        assert_eq!(zone, Some(EnemyKind::Weak));
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn strongest_defeat_wins_the_match() {
        let outcome = CombatOutcome::EnemyDefeated {
            enemy: EnemyKind::Strongest,
            despawned: false,
        };
        assert!(outcome.wins_match());
        assert!(!outcome.player_defeated());
    }
}
