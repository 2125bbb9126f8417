//! Player-side state for the Forage gathering engine.
//!
//! This crate holds the logic for the player's side of a gather: skill
//! progression and the inventory items are deposited into. It sits between
//! `forage-types` (data structures) and `forage-core` (the gather pipeline),
//! and performs no I/O.
//!
//! # Modules
//!
//! - [`error`] -- Error types ([`SkillError`], [`InventoryError`])
//! - [`inventory`] -- The [`InventorySink`] seam and the slot-limited [`Bag`]
//! - [`skills`] -- Per-category levels, XP, level-ups, and derived effects

pub mod error;
pub mod inventory;
pub mod skills;

pub use error::{InventoryError, SkillError};
pub use inventory::{Bag, DEFAULT_MAX_SLOTS, DEFAULT_MAX_STACK, InventorySink};
pub use skills::{MAX_SKILL_LEVEL, SkillLedger, XP_PER_LEVEL_STEP, effects};
