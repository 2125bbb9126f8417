//! Engine binary for the Forage gathering system.
//!
//! Loads configuration, builds the starting catalog, places instances, and
//! drives a simulated foraging session. At the end it prints a JSON summary
//! to stdout and optionally writes a progress snapshot.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `forage-config.yaml` (or `FORAGE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the game clock from clock config
//! 4. Build the starting catalog and rarity table
//! 5. Place instances of every node kind
//! 6. Run the session (gather loop plus sweep task)
//! 7. Write the snapshot and print the summary

mod error;
mod session;
mod spawner;
mod world;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use forage_core::config::LoggingConfig;
use forage_core::{EngineConfig, GameClock, GatherOrchestrator};
use forage_skills::Bag;

use crate::error::EngineError;
use crate::world::SessionWorld;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "forage-config.yaml";

/// Environment variable naming an alternative configuration file.
const CONFIG_PATH_ENV_VAR: &str = "FORAGE_CONFIG";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any initialization step or the session fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!("forage-engine starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        seed = config.session.seed,
        days = config.session.days,
        bonus_chance_pct = config.gather.bonus_chance_pct,
        sweep_interval_minutes = config.sweep.interval_minutes,
        "Session configuration"
    );

    // 3. Create the game clock.
    let clock = GameClock::new(&config.clock)?;
    info!(now = %clock.now(), season = ?clock.season(), "Game clock initialized");

    // 4. Build the starting catalog.
    let (catalog, rarity) = forage_world::create_starting_catalog()?;
    let catalog = Arc::new(catalog);
    info!(
        nodes = catalog.len(),
        golden_items = rarity.golden_count(),
        "Starting catalog built"
    );

    // 5. Place instances.
    let placements = spawner::spawn_instances(&catalog, config.session.instances_per_node);

    // 6. Run the session.
    let orchestrator = Arc::new(Mutex::new(GatherOrchestrator::new(
        Arc::clone(&catalog),
        rarity,
        &config.gather,
        config.session.seed,
    )));
    let mut world = SessionWorld::new(clock, &config.session);
    let mut bag = Bag::new(config.session.bag_slots, config.session.bag_max_stack);

    let summary = session::run_session(
        Arc::clone(&orchestrator),
        &mut world,
        placements,
        &mut bag,
        &config.session,
        &config.sweep,
    )
    .await?;

    // 7. Persist and report.
    if let Some(path) = &config.session.snapshot_path {
        let snapshot = orchestrator.lock().await.snapshot(Utc::now());
        tokio::fs::write(path, snapshot.to_json()?).await?;
        info!(
            path = %path,
            instances = snapshot.harvest_states.len(),
            "Progress snapshot written"
        );
    }

    let json = serde_json::to_string_pretty(&summary).map_err(|e| EngineError::Task {
        message: format!("failed to encode summary: {e}"),
    })?;
    println!("{json}");

    info!(
        gathers = summary.gathers,
        ended_at = %summary.ended_at,
        "forage-engine shutdown complete"
    );
    Ok(())
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured
/// level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load the engine configuration.
///
/// Reads `FORAGE_CONFIG` if set, else `forage-config.yaml` in the working
/// directory. A missing default file means defaults (with environment
/// overrides still applied). Returns the path actually read, if any.
fn load_config() -> Result<(EngineConfig, Option<PathBuf>), EngineError> {
    if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV_VAR) {
        let path = PathBuf::from(explicit);
        let config = EngineConfig::from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        let config = EngineConfig::from_file(default_path)?;
        Ok((config, Some(default_path.to_path_buf())))
    } else {
        Ok((EngineConfig::parse("")?, None))
    }
}
