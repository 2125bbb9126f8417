//! Gather pipeline, clock, and configuration for the Forage engine.
//!
//! This crate wires the catalog and harvest state from `forage-world` and
//! the skill ledger from `forage-skills` into one pipeline that turns a
//! player's "harvest this" into items, XP, and bookkeeping.
//!
//! # Modules
//!
//! - [`bonus`] -- Bonus round roll ([`BonusModifier`])
//! - [`chance`] -- Exact decimal chance draws
//! - [`clock`] -- In-game clock with season derivation ([`GameClock`])
//! - [`config`] -- Configuration loading from `forage-config.yaml` into
//!   strongly-typed structs ([`EngineConfig`])
//! - [`drops`] -- Drop table evaluation ([`drops::evaluate`])
//! - [`gather`] -- The gather pipeline ([`GatherOrchestrator`])
//! - [`providers`] -- Environment capability traits
//! - [`snapshot`] -- Progress persistence record ([`ProgressSnapshot`])

pub mod bonus;
pub mod chance;
pub mod clock;
pub mod config;
pub mod drops;
pub mod gather;
pub mod providers;
pub mod snapshot;

pub use bonus::{BonusModifier, BonusRoll};
pub use clock::{ClockError, GameClock};
pub use config::{ConfigError, EngineConfig};
pub use drops::DropOutcome;
pub use gather::{GatherOrchestrator, GatherRejection};
pub use providers::{
    EnvironmentSources, EventProvider, FixedEnvironment, MuseumProvider, SeasonProvider,
    TownProvider, WeatherProvider,
};
pub use snapshot::{ProgressSnapshot, SnapshotError};
