//! Error types for the forage-skills crate.
//!
//! Skill and inventory operations return typed errors rather than panicking.

use forage_types::ItemId;

/// Errors from skill ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    /// An arithmetic overflow occurred while crediting XP.
    #[error("arithmetic overflow in skill computation: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

/// Errors from inventory sink operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    /// Every slot is occupied and the item has no existing stack to join.
    #[error("inventory full: no free slot for {item} (capacity {max_slots})")]
    SlotsFull {
        /// The item being added.
        item: ItemId,
        /// Number of slots the inventory holds.
        max_slots: usize,
    },

    /// Adding would push a stack past the per-stack limit.
    #[error("stack full: adding {attempted} of {item} to {current} exceeds {max_stack}")]
    StackFull {
        /// The item being added.
        item: ItemId,
        /// The quantity the caller attempted to add.
        attempted: u32,
        /// The quantity already held.
        current: u32,
        /// Maximum quantity per stack.
        max_stack: u32,
    },

    /// Attempted to remove more of an item than the inventory holds.
    #[error("insufficient {item}: wanted {requested} but only have {available}")]
    Insufficient {
        /// The item being removed.
        item: ItemId,
        /// The quantity the caller attempted to remove.
        requested: u32,
        /// The quantity actually held.
        available: u32,
    },
}
