//! Attack contests and damage formulas.

use core::fmt;

use crate::env::RngOracle;
use crate::state::Stats;

use super::EnemyProfile;

// ============================================================================
// Damage Formulas
// ============================================================================

/// Damage of a landed player attack.
///
/// # Formula
///
/// ```text
/// damage = 2 + attack / 4
/// if lucky: damage += 2
/// ```
pub const fn player_damage(attack: i32, lucky: bool) -> i32 {
    let damage = 2 + attack / 4;
    if lucky { damage + 2 } else { damage }
}

/// Damage of a landed enemy attack.
///
/// # Formula
///
/// ```text
/// damage = 2 + enemy_attack / 5
/// if lucky: damage = max(damage - 2, 1)
/// ```
///
/// Here `lucky` is the defending player's luck check.
pub const fn enemy_damage(enemy_attack: i32, lucky: bool) -> i32 {
    let damage = 2 + enemy_attack / 5;
    if !lucky {
        damage
    } else if damage - 2 < 1 {
        1
    } else {
        damage - 2
    }
}

// ============================================================================
// Contests
// ============================================================================

/// Result of one attack contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strike {
    /// The attack landed. `lucky` records the player's luck check.
    Hit { damage: i32, lucky: bool },
    /// The attack was deflected; totals are roll plus stat on each side.
    Deflected { attack_total: i32, defense_total: i32 },
}

impl Strike {
    pub const fn damage(&self) -> i32 {
        match self {
            Self::Hit { damage, .. } => *damage,
            Self::Deflected { .. } => 0,
        }
    }
}

impl fmt::Display for Strike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit {
                damage,
                lucky: true,
            } => write!(f, "hit for {damage} damage (luck)"),
            Self::Hit { damage, .. } => write!(f, "hit for {damage} damage"),
            Self::Deflected {
                attack_total,
                defense_total,
            } => write!(f, "deflected ({attack_total} vs {defense_total})"),
        }
    }
}

/// The player attacks the enemy.
///
/// Draws: player d20, enemy d20, then a luck d20 only when the attack lands.
/// Ties go to the player.
pub fn player_strike(
    stats: &Stats,
    enemy: &EnemyProfile,
    rng: &mut (impl RngOracle + ?Sized),
) -> Strike {
    let attack_total = rng.roll_d20() as i32 + stats.attack.get();
    let defense_total = rng.roll_d20() as i32 + enemy.defense;
    if attack_total < defense_total {
        return Strike::Deflected {
            attack_total,
            defense_total,
        };
    }

    let lucky = stats.luck_check(rng.roll_d20());
    Strike::Hit {
        damage: player_damage(stats.attack.get(), lucky),
        lucky,
    }
}

/// The enemy retaliates against the player.
///
/// Draws: enemy d20, player d20, then a luck d20 only when the attack lands.
/// The enemy must beat the player's total strictly.
pub fn enemy_strike(
    enemy: &EnemyProfile,
    stats: &Stats,
    rng: &mut (impl RngOracle + ?Sized),
) -> Strike {
    let attack_total = rng.roll_d20() as i32 + enemy.attack;
    let defense_total = rng.roll_d20() as i32 + stats.defense.get();
    if attack_total <= defense_total {
        return Strike::Deflected {
            attack_total,
            defense_total,
        };
    }

    let lucky = stats.luck_check(rng.roll_d20());
    Strike::Hit {
        damage: enemy_damage(enemy.attack, lucky),
        lucky,
    }
}
