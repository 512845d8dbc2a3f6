//! Zone-level tags: worlds, zone types, enemies and items.

use core::fmt;

use strum::{EnumCount, EnumIter, IntoStaticStr};

/// One of the two mirrored worlds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum World {
    #[default]
    Real,
    UpsideDown,
}

impl World {
    /// Enemy kinds that may be placed in a zone of this world.
    pub const fn enemy_domain(self) -> &'static [EnemyKind] {
        match self {
            Self::Real => &[EnemyKind::Weak, EnemyKind::Medium],
            Self::UpsideDown => &[EnemyKind::Medium, EnemyKind::Strongest],
        }
    }

    /// Whether `enemy` belongs to this world's enemy domain.
    pub fn allows(self, enemy: EnemyKind) -> bool {
        self.enemy_domain().contains(&enemy)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Real => "Real World",
            Self::UpsideDown => "Upside Down",
        }
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of location; mirrored zones always share it.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ZoneKind {
    Forest,
    School,
    Laboratory,
    Cave,
    Road,
    Garden,
    Supermarket,
    PowerPlant,
    AbandonedDepot,
    PoliceStation,
}

impl ZoneKind {
    /// Maps a uniform draw in `0..ZoneKind::COUNT` onto a kind.
    pub fn from_index(index: usize) -> Self {
        use strum::IntoEnumIterator;
        Self::iter()
            .nth(index % Self::COUNT)
            .unwrap_or(Self::Forest)
    }
}

/// Enemy tiers. A zone with no enemy stores `None` instead of a tier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyKind {
    /// Real World only.
    #[strum(serialize = "stalker")]
    Weak,
    /// Both worlds.
    #[strum(serialize = "demodog")]
    Medium,
    /// Upside Down only, exactly one per closed map. Defeating it wins the match.
    #[strum(serialize = "mind_tyrant")]
    Strongest,
}

/// Consumable items. Only Real World zones carry them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter, IntoStaticStr, strum::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    /// +2 luck.
    LuckCharm,
    /// +3 attack.
    AttackTalisman,
    /// +2 defense.
    DefenseTrinket,
    /// 5 damage in combat, +1 attack and +1 defense outside.
    OffensiveInstrument,
}

impl ItemKind {
    /// Maps a uniform draw in `0..ItemKind::COUNT` onto a kind.
    pub fn from_index(index: usize) -> Self {
        use strum::IntoEnumIterator;
        Self::iter()
            .nth(index % Self::COUNT)
            .unwrap_or(Self::LuckCharm)
    }
}

/// Name shown for an optional enemy slot.
pub fn enemy_label(enemy: Option<EnemyKind>) -> &'static str {
    enemy.map_or("no_enemy", <&'static str>::from)
}

/// Name shown for an optional item slot.
pub fn item_label(item: Option<ItemKind>) -> &'static str {
    item.map_or("no_item", <&'static str>::from)
}

/// A zone of the Real World sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RealZone {
    pub kind: ZoneKind,
    pub enemy: Option<EnemyKind>,
    pub item: Option<ItemKind>,
}

impl RealZone {
    pub fn new(kind: ZoneKind, enemy: Option<EnemyKind>, item: Option<ItemKind>) -> Self {
        Self { kind, enemy, item }
    }
}

impl fmt::Display for RealZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={} enemy={} item={}",
            self.kind,
            enemy_label(self.enemy),
            item_label(self.item)
        )
    }
}

/// A zone of the Upside Down sequence. It never holds items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpsideZone {
    pub kind: ZoneKind,
    pub enemy: Option<EnemyKind>,
}

impl UpsideZone {
    pub fn new(kind: ZoneKind, enemy: Option<EnemyKind>) -> Self {
        Self { kind, enemy }
    }
}

impl fmt::Display for UpsideZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type={} enemy={}", self.kind, enemy_label(self.enemy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_domains_split_the_tiers() {
        assert!(World::Real.allows(EnemyKind::Weak));
        assert!(World::Real.allows(EnemyKind::Medium));
        assert!(!World::Real.allows(EnemyKind::Strongest));

        assert!(!World::UpsideDown.allows(EnemyKind::Weak));
        assert!(World::UpsideDown.allows(EnemyKind::Medium));
        assert!(World::UpsideDown.allows(EnemyKind::Strongest));
    }

    #[test]
    fn index_draws_cover_every_kind() {
        assert_eq!(ZoneKind::COUNT, 10);
        assert_eq!(ZoneKind::from_index(0), ZoneKind::Forest);
        assert_eq!(ZoneKind::from_index(9), ZoneKind::PoliceStation);
        assert_eq!(ItemKind::from_index(3), ItemKind::OffensiveInstrument);
    }

    #[test]
    fn zones_render_their_tags() {
        let zone = RealZone::new(ZoneKind::PowerPlant, None, Some(ItemKind::LuckCharm));
        assert_eq!(
            zone.to_string(),
            "type=power_plant enemy=no_enemy item=luck_charm"
        );

        let mirror = UpsideZone::new(ZoneKind::PowerPlant, Some(EnemyKind::Strongest));
        assert_eq!(mirror.to_string(), "type=power_plant enemy=mind_tyrant");
    }
}
