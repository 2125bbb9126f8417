//! Configuration loading and typed config structures for the Forage engine.
//!
//! The canonical configuration lives in `forage-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, and provides a loader that reads the file. Every field has a
//! default, so a partial (or empty) file is valid.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Environment variable that overrides `session.seed`.
pub const SEED_ENV_VAR: &str = "FORAGE_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override holds a value that does not parse.
    #[error("invalid value {value:?} in environment variable {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `forage-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// In-game clock settings.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Gather pipeline tuning.
    #[serde(default)]
    pub gather: GatherConfig,

    /// Daily-claim sweep cadence.
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Simulated session driven by the engine binary.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `FORAGE_SEED` overrides `session.seed` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if `FORAGE_SEED` is not a `u64`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if an override does not parse.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config
            .session
            .apply_seed_override(std::env::var(SEED_ENV_VAR).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string without consulting the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// In-game clock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Day the session starts on.
    #[serde(default)]
    pub start_day: u64,

    /// Hour of day (0--23) the session starts at.
    #[serde(default = "default_start_hour")]
    pub start_hour: u64,

    /// In-game days per season.
    #[serde(default = "default_days_per_season")]
    pub days_per_season: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            start_day: 0,
            start_hour: default_start_hour(),
            days_per_season: default_days_per_season(),
        }
    }
}

/// Gather pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatherConfig {
    /// Base success chance of the bonus round, in whole percent.
    #[serde(default = "default_bonus_chance_pct")]
    pub bonus_chance_pct: u32,
}

impl GatherConfig {
    /// Bonus-round base chance as a fraction in `[0, 1]`.
    pub fn bonus_chance(&self) -> Decimal {
        Decimal::new(i64::from(self.bonus_chance_pct), 2).min(Decimal::ONE)
    }
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            bonus_chance_pct: default_bonus_chance_pct(),
        }
    }
}

/// Sweep cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SweepConfig {
    /// In-game minutes between daily-claim sweeps.
    #[serde(default = "default_sweep_interval_minutes")]
    pub interval_minutes: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_sweep_interval_minutes(),
        }
    }
}

/// Simulated foraging session settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// In-game days to simulate.
    #[serde(default = "default_session_days")]
    pub days: u64,

    /// Real-time milliseconds per session tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// In-game minutes that pass each session tick.
    #[serde(default = "default_minutes_per_tick")]
    pub minutes_per_tick: u64,

    /// Instances spawned per catalog node kind.
    #[serde(default = "default_instances_per_node")]
    pub instances_per_node: u32,

    /// Grade of every tool the forager carries.
    #[serde(default = "default_tool_grade")]
    pub tool_grade: u32,

    /// Town level reported to drop conditions.
    #[serde(default = "default_town_level")]
    pub town_level: u32,

    /// Museum completion percentage reported to drop conditions.
    #[serde(default)]
    pub museum_completion: u32,

    /// Active event id, if any.
    #[serde(default)]
    pub event_id: Option<String>,

    /// Inventory slot count.
    #[serde(default = "default_bag_slots")]
    pub bag_slots: usize,

    /// Inventory per-stack limit.
    #[serde(default = "default_bag_max_stack")]
    pub bag_max_stack: u32,

    /// Where to write the progress snapshot at session end.
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

impl SessionConfig {
    /// Apply a `FORAGE_SEED` value, if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if the value is not a `u64`.
    pub fn apply_seed_override(&mut self, value: Option<String>) -> Result<(), ConfigError> {
        if let Some(raw) = value {
            self.seed = raw.trim().parse().map_err(|_err| ConfigError::InvalidEnv {
                var: SEED_ENV_VAR,
                value: raw.clone(),
            })?;
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            days: default_session_days(),
            tick_interval_ms: default_tick_interval_ms(),
            minutes_per_tick: default_minutes_per_tick(),
            instances_per_node: default_instances_per_node(),
            tool_grade: default_tool_grade(),
            town_level: default_town_level(),
            museum_completion: 0,
            event_id: None,
            bag_slots: default_bag_slots(),
            bag_max_stack: default_bag_max_stack(),
            snapshot_path: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_start_hour() -> u64 {
    6
}

const fn default_days_per_season() -> u64 {
    28
}

const fn default_bonus_chance_pct() -> u32 {
    30
}

const fn default_sweep_interval_minutes() -> u64 {
    60
}

const fn default_seed() -> u64 {
    42
}

const fn default_session_days() -> u64 {
    3
}

const fn default_tick_interval_ms() -> u64 {
    20
}

const fn default_minutes_per_tick() -> u64 {
    30
}

const fn default_instances_per_node() -> u32 {
    2
}

const fn default_tool_grade() -> u32 {
    1
}

const fn default_town_level() -> u32 {
    1
}

const fn default_bag_slots() -> usize {
    24
}

const fn default_bag_max_stack() -> u32 {
    999
}

fn default_log_level() -> String {
    "info".to_owned()
}
