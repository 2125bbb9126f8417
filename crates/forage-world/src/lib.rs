//! Node catalog, harvest-state tracking, and environment for the Forage
//! gathering engine.
//!
//! This crate owns the world side of gathering: which kinds of harvestable
//! exist, and what state each placed instance is in.
//!
//! # Modules
//!
//! - [`catalog`] -- Immutable registry of node definitions ([`NodeCatalog`]),
//!   assembled and validated through [`NodeCatalogBuilder`].
//! - [`environment`] -- Seeded, season-weighted daily weather generation.
//! - [`error`] -- Error types for catalog and tracker operations.
//! - [`harvest`] -- Per-instance harvest counts, cooldowns, daily claims,
//!   and depletion ([`HarvestStateTracker`]).
//! - [`rarity`] -- Golden item flags ([`RarityTable`]).
//! - [`starting_catalog`] -- The default catalog shipped with the game.

pub mod catalog;
pub mod environment;
pub mod error;
pub mod harvest;
pub mod rarity;
pub mod starting_catalog;

// Re-export primary types at crate root.
pub use catalog::{NodeCatalog, NodeCatalogBuilder};
pub use environment::DailyWeather;
pub use error::WorldError;
pub use harvest::{HarvestRecord, HarvestStateTracker};
pub use rarity::RarityTable;
pub use starting_catalog::{GOLDEN_ITEMS, create_starting_catalog, starting_nodes};
