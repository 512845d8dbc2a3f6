//! Procedural generation tables.
//!
//! Each pair draws, in order: zone type, Real World enemy, Real World item,
//! Upside Down enemy.
//!
//! | draw              | table (d100)                                   |
//! |-------------------|------------------------------------------------|
//! | Real World enemy  | 1-40 none, 41-70 medium, 71-100 weak           |
//! | Real World item   | 1-60 none, 61-100 one of 4 kinds (uniform)     |
//! | Upside Down enemy | 1-45 none, 46-80 medium, 81-100 strongest      |

use strum::EnumCount;

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{EnemyKind, ItemKind, RealZone, UpsideZone, World, ZoneKind};

use super::{MapError, ZoneStore};

/// Uniform zone type.
pub fn roll_zone_kind(rng: &mut (impl RngOracle + ?Sized)) -> ZoneKind {
    ZoneKind::from_index(rng.range(0, ZoneKind::COUNT as u32 - 1) as usize)
}

pub fn roll_real_enemy(rng: &mut (impl RngOracle + ?Sized)) -> Option<EnemyKind> {
    match rng.roll_d100() {
        0..=40 => None,
        41..=70 => Some(EnemyKind::Medium),
        _ => Some(EnemyKind::Weak),
    }
}

pub fn roll_item(rng: &mut (impl RngOracle + ?Sized)) -> Option<ItemKind> {
    if rng.roll_d100() <= 60 {
        return None;
    }
    Some(ItemKind::from_index(
        rng.range(0, ItemKind::COUNT as u32 - 1) as usize,
    ))
}

pub fn roll_upside_enemy(rng: &mut (impl RngOracle + ?Sized)) -> Option<EnemyKind> {
    match rng.roll_d100() {
        0..=45 => None,
        46..=80 => Some(EnemyKind::Medium),
        _ => Some(EnemyKind::Strongest),
    }
}

/// Builds a fresh store of [`GameConfig::GENERATED_PAIRS`] random pairs with
/// exactly one strongest enemy.
pub(super) fn generate_store(rng: &mut (impl RngOracle + ?Sized)) -> Result<ZoneStore, MapError> {
    let mut store = ZoneStore::new();
    for position in 1..=GameConfig::GENERATED_PAIRS {
        let kind = roll_zone_kind(rng);
        let real_enemy = roll_real_enemy(rng);
        let item = roll_item(rng);
        let upside_enemy = roll_upside_enemy(rng);

        store.insert(
            position,
            RealZone::new(kind, real_enemy, item),
            UpsideZone::new(kind, upside_enemy),
        )?;
    }
    enforce_single_strongest(&mut store, rng);
    Ok(store)
}

/// Forces exactly one strongest enemy into the Upside Down.
///
/// With none present a uniformly chosen zone receives it; with several, every
/// occurrence after the first (in sequence order) is demoted to medium.
fn enforce_single_strongest(store: &mut ZoneStore, rng: &mut (impl RngOracle + ?Sized)) {
    if store.is_empty() {
        return;
    }

    if store.strongest_count() == 0 {
        let ordinal = rng.range(1, store.len() as u32) as usize;
        if let Some(zone) = store
            .at(World::UpsideDown, ordinal)
            .and_then(|id| store.upside_mut(id))
        {
            zone.enemy = Some(EnemyKind::Strongest);
        }
        return;
    }

    let ids: Vec<_> = store.iter(World::UpsideDown).collect();
    let mut seen = false;
    for id in ids {
        let Some(zone) = store.upside_mut(id) else {
            continue;
        };
        if zone.enemy == Some(EnemyKind::Strongest) {
            if seen {
                zone.enemy = Some(EnemyKind::Medium);
            }
            seen = true;
        }
    }
}
