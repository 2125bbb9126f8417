//! Inventory sink: where gathered items land.
//!
//! The gather pipeline only sees the [`InventorySink`] trait. The player's
//! inventory is shared with other systems (crafting, shops, quests), so any
//! deposit may be refused and the caller must cope with that.
//!
//! [`Bag`] is a slot-limited reference implementation: each distinct item
//! takes one slot and each stack holds at most `max_stack` units. All
//! quantity math is checked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use forage_types::ItemId;

use crate::error::InventoryError;

/// Default number of slots in a [`Bag`].
pub const DEFAULT_MAX_SLOTS: usize = 24;

/// Default per-stack limit in a [`Bag`].
pub const DEFAULT_MAX_STACK: u32 = 999;

/// Something that accepts and releases items.
pub trait InventorySink {
    /// Add `count` units of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError`] if the inventory cannot hold the items. A
    /// failed add must leave the inventory unchanged.
    fn add(&mut self, item: &ItemId, count: u32) -> Result<(), InventoryError>;

    /// Remove `count` units of `item`.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Insufficient`] if fewer than `count` units
    /// are held.
    fn remove(&mut self, item: &ItemId, count: u32) -> Result<(), InventoryError>;

    /// Every held item and its quantity.
    fn list(&self) -> Vec<(ItemId, u32)>;
}

/// Slot- and stack-limited inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    max_slots: usize,
    max_stack: u32,
    stacks: BTreeMap<ItemId, u32>,
}

impl Bag {
    /// Create an empty bag with the given limits.
    pub const fn new(max_slots: usize, max_stack: u32) -> Self {
        Self {
            max_slots,
            max_stack,
            stacks: BTreeMap::new(),
        }
    }

    /// Quantity held of an item.
    pub fn quantity(&self, item: &ItemId) -> u32 {
        self.stacks.get(item).copied().unwrap_or(0)
    }

    /// Number of occupied slots.
    pub fn used_slots(&self) -> usize {
        self.stacks.len()
    }

    /// Total units across all stacks, or `None` on overflow.
    pub fn total_units(&self) -> Option<u32> {
        self.stacks
            .values()
            .try_fold(0_u32, |total, &qty| total.checked_add(qty))
    }

    /// Whether the bag holds nothing.
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SLOTS, DEFAULT_MAX_STACK)
    }
}

impl InventorySink for Bag {
    fn add(&mut self, item: &ItemId, count: u32) -> Result<(), InventoryError> {
        if count == 0 {
            return Ok(());
        }

        let current = self.quantity(item);
        if current == 0 && self.stacks.len() >= self.max_slots {
            return Err(InventoryError::SlotsFull {
                item: item.clone(),
                max_slots: self.max_slots,
            });
        }

        let stack_full = || InventoryError::StackFull {
            item: item.clone(),
            attempted: count,
            current,
            max_stack: self.max_stack,
        };
        let updated = current.checked_add(count).ok_or_else(stack_full)?;
        if updated > self.max_stack {
            return Err(stack_full());
        }

        self.stacks.insert(item.clone(), updated);
        Ok(())
    }

    fn remove(&mut self, item: &ItemId, count: u32) -> Result<(), InventoryError> {
        let available = self.quantity(item);
        let remaining = available
            .checked_sub(count)
            .ok_or_else(|| InventoryError::Insufficient {
                item: item.clone(),
                requested: count,
                available,
            })?;

        if remaining == 0 {
            self.stacks.remove(item);
        } else {
            self.stacks.insert(item.clone(), remaining);
        }
        Ok(())
    }

    fn list(&self) -> Vec<(ItemId, u32)> {
        self.stacks
            .iter()
            .map(|(item, &qty)| (item.clone(), qty))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ItemId {
        ItemId::from(name)
    }

    #[test]
    fn add_and_list() {
        let mut bag = Bag::default();
        assert!(bag.add(&item("돌"), 3).is_ok());
        assert!(bag.add(&item("돌"), 2).is_ok());
        assert!(bag.add(&item("나무"), 4).is_ok());
        assert_eq!(bag.quantity(&item("돌")), 5);
        assert_eq!(bag.used_slots(), 2);
        assert_eq!(bag.total_units(), Some(9));
        assert_eq!(bag.list(), vec![(item("나무"), 4), (item("돌"), 5)]);
    }

    #[test]
    fn add_zero_is_noop() {
        let mut bag = Bag::new(0, 10);
        assert!(bag.add(&item("돌"), 0).is_ok());
        assert!(bag.is_empty());
    }

    #[test]
    fn new_item_rejected_when_slots_full() {
        let mut bag = Bag::new(1, 10);
        assert!(bag.add(&item("돌"), 1).is_ok());
        let result = bag.add(&item("석탄"), 1);
        assert!(matches!(result, Err(InventoryError::SlotsFull { .. })));
        // Existing stacks still accept more.
        assert!(bag.add(&item("돌"), 1).is_ok());
        assert_eq!(bag.quantity(&item("돌")), 2);
    }

    #[test]
    fn stack_limit_rejects_without_partial_add() {
        let mut bag = Bag::new(4, 5);
        assert!(bag.add(&item("돌"), 4).is_ok());
        let result = bag.add(&item("돌"), 2);
        assert!(matches!(result, Err(InventoryError::StackFull { current: 4, .. })));
        assert_eq!(bag.quantity(&item("돌")), 4);
    }

    #[test]
    fn count_overflow_is_a_full_stack() {
        let mut bag = Bag::new(4, u32::MAX);
        assert!(bag.add(&item("돌"), u32::MAX - 1).is_ok());
        let result = bag.add(&item("돌"), 2);
        assert!(matches!(
            result,
            Err(InventoryError::StackFull {
                attempted: 2,
                max_stack: u32::MAX,
                ..
            })
        ));
        assert_eq!(bag.quantity(&item("돌")), u32::MAX - 1);
    }

    #[test]
    fn remove_frees_slot_when_emptied() {
        let mut bag = Bag::new(1, 10);
        assert!(bag.add(&item("돌"), 3).is_ok());
        assert!(bag.remove(&item("돌"), 3).is_ok());
        assert!(bag.is_empty());
        assert!(bag.add(&item("석탄"), 1).is_ok());
    }

    #[test]
    fn remove_more_than_held_fails() {
        let mut bag = Bag::default();
        assert!(bag.add(&item("돌"), 2).is_ok());
        let result = bag.remove(&item("돌"), 3);
        assert_eq!(
            result,
            Err(InventoryError::Insufficient {
                item: item("돌"),
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(bag.quantity(&item("돌")), 2);
    }

    #[test]
    fn works_through_trait_object() {
        let mut bag = Bag::default();
        let sink: &mut dyn InventorySink = &mut bag;
        assert!(sink.add(&item("조개껍데기"), 1).is_ok());
        assert_eq!(sink.list().len(), 1);
    }
}
