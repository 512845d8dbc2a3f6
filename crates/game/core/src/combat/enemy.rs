//! Base stats of each enemy tier.

use crate::state::EnemyKind;

/// Stats of a freshly spawned enemy.
///
/// Zones store only the enemy tag; a new profile is derived from it at the
/// start of every encounter, so damage never carries over between fights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
}

impl EnemyProfile {
    pub const fn of(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Weak => Self {
                hp: 12,
                attack: 8,
                defense: 8,
            },
            EnemyKind::Medium => Self {
                hp: 16,
                attack: 10,
                defense: 10,
            },
            EnemyKind::Strongest => Self {
                hp: 24,
                attack: 14,
                defense: 12,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_grow_stronger() {
        let weak = EnemyProfile::of(EnemyKind::Weak);
        let medium = EnemyProfile::of(EnemyKind::Medium);
        let strongest = EnemyProfile::of(EnemyKind::Strongest);

        assert_eq!(weak.hp, 12);
        assert!(weak.hp < medium.hp && medium.hp < strongest.hp);
        assert!(weak.attack < medium.attack && medium.attack < strongest.attack);
    }
}
