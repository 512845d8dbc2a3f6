//! Map construction and editing while the map is open.

use core::fmt;

use crate::env::RngOracle;
use crate::state::{EnemyKind, ItemKind, RealZone, UpsideZone, World};

use super::generate::{generate_store, roll_zone_kind};
use super::{GameMap, MapError, MapPhase, PairId, PositionRepair, ZoneView};

/// Both halves of the pair at one ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairView {
    pub ordinal: usize,
    pub real: RealZone,
    pub upside: UpsideZone,
}

impl fmt::Display for PairView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: [{}] {}", World::Real, self.ordinal, self.real)?;
        write!(f, "{}: [{}] {}", World::UpsideDown, self.ordinal, self.upside)
    }
}

/// Edits a [`GameMap`] while it is open and closes it once it is playable.
///
/// Every mutating operation fails with [`MapError::MapClosed`] after a
/// successful [`close`](Self::close).
pub struct MapBuilder<'a> {
    map: &'a mut GameMap,
}

impl<'a> MapBuilder<'a> {
    pub fn new(map: &'a mut GameMap) -> Self {
        Self { map }
    }

    /// Discards the current zones and generates a fresh random map.
    ///
    /// The new map is assembled separately and swapped in only when complete,
    /// so a failure leaves the previous map intact.
    pub fn generate(&mut self, rng: &mut (impl RngOracle + ?Sized)) -> Result<usize, MapError> {
        self.ensure_open()?;
        let store = generate_store(rng)?;
        let pairs = store.len();
        self.map.replace(store);
        tracing::debug!(pairs, "map generated");
        Ok(pairs)
    }

    /// Enemy choices for a new Real World zone.
    pub fn real_enemy_choices(&self) -> Vec<Option<EnemyKind>> {
        Self::choices(World::Real, true)
    }

    /// Enemy choices for a new Upside Down zone.
    ///
    /// The strongest enemy is offered only while the map has none.
    pub fn upside_enemy_choices(&self) -> Vec<Option<EnemyKind>> {
        Self::choices(World::UpsideDown, self.map.store().strongest_count() == 0)
    }

    fn choices(world: World, allow_strongest: bool) -> Vec<Option<EnemyKind>> {
        core::iter::once(None)
            .chain(
                world
                    .enemy_domain()
                    .iter()
                    .copied()
                    .filter(|enemy| allow_strongest || *enemy != EnemyKind::Strongest)
                    .map(Some),
            )
            .collect()
    }

    /// Inserts a pair at the one-based `position` (`1..=len + 1`).
    ///
    /// The zone type is drawn at random and shared by both halves; enemies
    /// and item come from the caller.
    pub fn insert(
        &mut self,
        position: usize,
        real_enemy: Option<EnemyKind>,
        item: Option<ItemKind>,
        upside_enemy: Option<EnemyKind>,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<PairId, MapError> {
        self.ensure_open()?;

        let max = self.map.len() + 1;
        if !(1..=max).contains(&position) {
            return Err(MapError::InvalidPosition { position, max });
        }
        Self::ensure_allowed(World::Real, real_enemy)?;
        Self::ensure_allowed(World::UpsideDown, upside_enemy)?;
        if upside_enemy == Some(EnemyKind::Strongest) && self.map.store().strongest_count() > 0 {
            return Err(MapError::StrongestAlreadyPlaced);
        }

        let kind = roll_zone_kind(rng);
        let id = self.map.store_mut().insert(
            position,
            RealZone::new(kind, real_enemy, item),
            UpsideZone::new(kind, upside_enemy),
        )?;
        tracing::debug!(position, kind = %kind, "pair inserted");
        Ok(id)
    }

    /// Removes the pair at the one-based `position`, relocating any player
    /// standing on it to the head of the map.
    pub fn delete(
        &mut self,
        position: usize,
        repair: &mut impl PositionRepair,
    ) -> Result<PairView, MapError> {
        self.ensure_open()?;
        let (real, upside) = self.map.store_mut().remove(position, repair)?;
        tracing::debug!(position, "pair removed");
        Ok(PairView {
            ordinal: position,
            real,
            upside,
        })
    }

    /// Every zone of `world`, head to tail, with its ordinal.
    pub fn list(&self, world: World) -> Vec<(usize, ZoneView)> {
        self.map
            .store()
            .iter(world)
            .filter_map(|id| self.map.zone(world, id))
            .enumerate()
            .map(|(index, zone)| (index + 1, zone))
            .collect()
    }

    /// Both halves of the pair at the one-based `position`.
    pub fn inspect(&self, position: usize) -> Result<PairView, MapError> {
        let store = self.map.store();
        if store.is_empty() {
            return Err(MapError::EmptyMap);
        }
        let invalid = MapError::InvalidPosition {
            position,
            max: store.len(),
        };
        let id = store.at(World::Real, position).ok_or(invalid)?;
        let real = store.real(id).copied().ok_or(invalid)?;
        let upside = store.upside(id).copied().ok_or(invalid)?;
        Ok(PairView {
            ordinal: position,
            real,
            upside,
        })
    }

    /// Freezes the map for play.
    pub fn close(&mut self) -> Result<(), MapError> {
        self.ensure_open()?;
        self.map.check_ready()?;
        self.map.set_phase(MapPhase::Closed);
        tracing::debug!(pairs = self.map.len(), "map closed");
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), MapError> {
        if self.map.is_closed() {
            Err(MapError::MapClosed)
        } else {
            Ok(())
        }
    }

    fn ensure_allowed(world: World, enemy: Option<EnemyKind>) -> Result<(), MapError> {
        match enemy {
            Some(enemy) if !world.allows(enemy) => Err(MapError::EnemyNotAllowed { enemy, world }),
            _ => Ok(()),
        }
    }
}
