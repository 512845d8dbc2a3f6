//! Item effect application.

use crate::config::GameConfig;
use crate::state::{ItemKind, Stats};

/// Where an item is being used.
#[derive(Debug, PartialEq, Eq)]
pub enum EffectContext<'a> {
    /// Free action during a turn.
    OutOfCombat,
    /// During an encounter; the item may damage the current enemy.
    Combat { enemy_hp: &'a mut i32 },
}

/// What applying an item did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    LuckRaised { luck: i32 },
    AttackRaised { attack: i32 },
    DefenseRaised { defense: i32 },
    AttackAndDefenseRaised { attack: i32, defense: i32 },
    EnemyDamaged { damage: i32, enemy_hp: i32 },
}

/// Applies `item` to `stats` (or to the enemy, in combat).
///
/// The caller removes the item from the inventory; every item is single-use.
pub fn apply_item(item: ItemKind, stats: &mut Stats, context: EffectContext<'_>) -> ItemEffect {
    match item {
        ItemKind::LuckCharm => {
            stats.luck = stats.luck.offset(2);
            ItemEffect::LuckRaised {
                luck: stats.luck.get(),
            }
        }
        ItemKind::AttackTalisman => {
            stats.attack = stats.attack.offset(3);
            ItemEffect::AttackRaised {
                attack: stats.attack.get(),
            }
        }
        ItemKind::DefenseTrinket => {
            stats.defense = stats.defense.offset(2);
            ItemEffect::DefenseRaised {
                defense: stats.defense.get(),
            }
        }
        ItemKind::OffensiveInstrument => match context {
            EffectContext::Combat { enemy_hp } => {
                *enemy_hp -= GameConfig::INSTRUMENT_DAMAGE;
                ItemEffect::EnemyDamaged {
                    damage: GameConfig::INSTRUMENT_DAMAGE,
                    enemy_hp: *enemy_hp,
                }
            }
            EffectContext::OutOfCombat => {
                stats.attack = stats.attack.offset(1);
                stats.defense = stats.defense.offset(1);
                ItemEffect::AttackAndDefenseRaised {
                    attack: stats.attack.get(),
                    defense: stats.defense.get(),
                }
            }
        },
    }
}

impl core::fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LuckRaised { luck } => write!(f, "Luck raised to {luck}."),
            Self::AttackRaised { attack } => write!(f, "Attack raised to {attack}."),
            Self::DefenseRaised { defense } => write!(f, "Defense raised to {defense}."),
            Self::AttackAndDefenseRaised { attack, defense } => {
                write!(f, "Attack raised to {attack}, defense raised to {defense}.")
            }
            Self::EnemyDamaged { damage, .. } => {
                write!(f, "The instrument screams! The enemy takes {damage} damage.")
            }
        }
    }
}
