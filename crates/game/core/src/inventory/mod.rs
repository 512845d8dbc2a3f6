//! Player inventory and item effects.
//!
//! An inventory has exactly [`GameConfig::INVENTORY_SLOTS`] slots; each holds
//! nothing or one item. Items are single-use: applying one empties its slot.

mod effects;

pub use effects::{EffectContext, ItemEffect, apply_item};

use core::fmt;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemKind, Player, RealZone, World, item_label};

/// Errors raised by inventory operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    #[error("inventory is full")]
    InventoryFull,

    #[error("inventory is empty")]
    EmptyInventory,

    #[error("slot {slot} holds no item")]
    EmptySlot { slot: usize },

    #[error("slot {slot} does not exist (1-{max})")]
    SlotOutOfRange { slot: usize, max: usize },

    #[error("there are no items in the Upside Down")]
    NotInRealWorld,

    #[error("the enemy in this zone must be defeated first")]
    EnemyPresent,

    #[error("there is no item to collect here")]
    NoItem,
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SlotOutOfRange { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InventoryFull => "INVENTORY_FULL",
            Self::EmptyInventory => "EMPTY_INVENTORY",
            Self::EmptySlot { .. } => "EMPTY_SLOT",
            Self::SlotOutOfRange { .. } => "OUT_OF_RANGE",
            Self::NotInRealWorld => "NOT_IN_REAL_WORLD",
            Self::EnemyPresent => "ENEMY_PRESENT",
            Self::NoItem => "NO_ITEM",
        }
    }
}

/// Fixed-size item storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    slots: [Option<ItemKind>; GameConfig::INVENTORY_SLOTS],
}

impl Inventory {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read-only view of the slots, in order.
    pub fn slots(&self) -> &[Option<ItemKind>] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Places `item` into the first free slot and returns its zero-based index.
    pub fn store(&mut self, item: ItemKind) -> Result<usize, InventoryError> {
        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(InventoryError::InventoryFull)?;
        self.slots[index] = Some(item);
        Ok(index)
    }

    /// Removes and returns the item in the one-based `slot`.
    pub fn take(&mut self, slot: usize) -> Result<ItemKind, InventoryError> {
        if self.is_empty() {
            return Err(InventoryError::EmptyInventory);
        }
        let entry = slot
            .checked_sub(1)
            .and_then(|index| self.slots.get_mut(index))
            .ok_or(InventoryError::SlotOutOfRange {
                slot,
                max: GameConfig::INVENTORY_SLOTS,
            })?;
        entry.take().ok_or(InventoryError::EmptySlot { slot })
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(item_label(*slot))?;
        }
        Ok(())
    }
}

/// Moves the item of `zone` into the player's first free slot.
///
/// The caller passes the Real World half of the pair the player stands on.
/// Requires the player to be in the Real World and the zone to be free of
/// enemies. On failure nothing changes.
pub fn collect_item(player: &mut Player, zone: &mut RealZone) -> Result<ItemKind, InventoryError> {
    if player.world != World::Real {
        return Err(InventoryError::NotInRealWorld);
    }
    if zone.enemy.is_some() {
        return Err(InventoryError::EnemyPresent);
    }
    let item = zone.item.ok_or(InventoryError::NoItem)?;
    player.inventory.store(item)?;
    zone.item = None;
    tracing::debug!(player = %player.name, item = %item, "item collected");
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EnemyKind, Stats, ZoneKind};

    fn zone(enemy: Option<EnemyKind>, item: Option<ItemKind>) -> RealZone {
        RealZone::new(ZoneKind::School, enemy, item)
    }

    #[test]
    fn store_fills_first_free_slot() {
        let mut inventory = Inventory::empty();
        assert_eq!(inventory.store(ItemKind::LuckCharm), Ok(0));
        assert_eq!(inventory.store(ItemKind::AttackTalisman), Ok(1));
        assert_eq!(inventory.take(1), Ok(ItemKind::LuckCharm));
        assert_eq!(inventory.store(ItemKind::DefenseTrinket), Ok(0));
        assert_eq!(inventory.store(ItemKind::OffensiveInstrument), Ok(2));
        assert!(inventory.is_full());
        assert_eq!(
            inventory.store(ItemKind::LuckCharm),
            Err(InventoryError::InventoryFull)
        );
    }

    #[test]
    fn take_reports_slot_problems() {
        let mut inventory = Inventory::empty();
        assert_eq!(inventory.take(1), Err(InventoryError::EmptyInventory));

        inventory.store(ItemKind::LuckCharm).unwrap();
        assert_eq!(inventory.take(2), Err(InventoryError::EmptySlot { slot: 2 }));
        assert_eq!(
            inventory.take(4),
            Err(InventoryError::SlotOutOfRange { slot: 4, max: 3 })
        );
        assert_eq!(
            inventory.take(0),
            Err(InventoryError::SlotOutOfRange { slot: 0, max: 3 })
        );
        assert_eq!(inventory.to_string(), "luck_charm, no_item, no_item");
    }

    #[test]
    fn collect_moves_item_into_inventory() {
        let mut player = Player::new("Robin", Stats::uniform(10));
        let mut here = zone(None, Some(ItemKind::DefenseTrinket));

        assert_eq!(collect_item(&mut player, &mut here), Ok(ItemKind::DefenseTrinket));
        assert_eq!(here.item, None);
        assert_eq!(player.inventory.slots()[0], Some(ItemKind::DefenseTrinket));
        assert_eq!(
            collect_item(&mut player, &mut here),
            Err(InventoryError::NoItem)
        );
    }

    #[test]
    fn collect_requires_real_world_and_clear_zone() {
        let mut player = Player::new("Robin", Stats::uniform(10));
        let mut guarded = zone(Some(EnemyKind::Weak), Some(ItemKind::LuckCharm));
        assert_eq!(
            collect_item(&mut player, &mut guarded),
            Err(InventoryError::EnemyPresent)
        );
        assert_eq!(guarded.item, Some(ItemKind::LuckCharm));

        player.world = World::UpsideDown;
        let mut clear = zone(None, Some(ItemKind::LuckCharm));
        assert_eq!(
            collect_item(&mut player, &mut clear),
            Err(InventoryError::NotInRealWorld)
        );
    }

    #[test]
    fn collect_fails_when_full_and_keeps_zone_item() {
        let mut player = Player::new("Robin", Stats::uniform(10));
        for _ in 0..GameConfig::INVENTORY_SLOTS {
            player.inventory.store(ItemKind::LuckCharm).unwrap();
        }
        let mut here = zone(None, Some(ItemKind::AttackTalisman));
        assert_eq!(
            collect_item(&mut player, &mut here),
            Err(InventoryError::InventoryFull)
        );
        assert_eq!(here.item, Some(ItemKind::AttackTalisman));
    }
}
