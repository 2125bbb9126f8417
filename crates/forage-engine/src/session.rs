//! The simulated foraging session.
//!
//! A forager walks the world on a real-time tick. Each tick advances the
//! in-game clock and tries to harvest every placed instance. A separate
//! sweep task clears expired daily claims on its own in-game cadence. Both
//! share the orchestrator through an async mutex, so there is only ever one
//! writer.
//!
//! Rejections are a normal part of play (most instances are on cooldown
//! most of the time) and are only counted. Depleted instances are removed
//! and replaced by fresh ones.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use forage_core::config::{SessionConfig, SweepConfig};
use forage_core::{GatherOrchestrator, GatherRejection};
use forage_skills::{Bag, InventorySink};
use forage_types::{GameTime, GatherRequest, NodeCategory, RejectionReason, ToolType};

use crate::error::EngineError;
use crate::spawner::Placement;
use crate::world::SessionWorld;

/// Chance, in percent, that the forager reaches for the wrong tool.
const FUMBLE_PERCENT: u32 = 5;

/// Tools the forager might fumble to.
const TOOLS: [ToolType; 5] = [
    ToolType::Hand,
    ToolType::Axe,
    ToolType::Pickaxe,
    ToolType::Shovel,
    ToolType::WateringCan,
];

/// What a session produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Session ticks run.
    pub ticks: u64,
    /// In-game time at the end.
    pub ended_at: GameTime,
    /// Successful gathers.
    pub gathers: u64,
    /// Rejections by reason.
    pub rejections: BTreeMap<RejectionReason, u64>,
    /// Instances depleted and replaced.
    pub depleted: u64,
    /// Item units refused by the inventory.
    pub items_lost: u64,
    /// Daily claims cleared by the sweep task.
    pub claims_swept: u64,
    /// Final skill level per category.
    pub levels: BTreeMap<NodeCategory, u32>,
    /// Final inventory contents.
    pub inventory: BTreeMap<String, u32>,
}

/// Run a session until `session.days` in-game days have passed.
///
/// # Errors
///
/// Returns [`EngineError::Clock`] if the clock overflows, or
/// [`EngineError::Task`] if the sweep task fails.
pub async fn run_session(
    orchestrator: Arc<Mutex<GatherOrchestrator>>,
    world: &mut SessionWorld,
    placements: Vec<Placement>,
    bag: &mut Bag,
    session: &SessionConfig,
    sweep: &SweepConfig,
) -> Result<SessionSummary, EngineError> {
    let (time_tx, time_rx) = watch::channel(world.clock.now());
    let sweeper = spawn_sweeper(Arc::clone(&orchestrator), time_rx, sweep.interval_minutes);

    let end_day = world.clock.day().saturating_add(session.days);
    let mut rng = SmallRng::seed_from_u64(session.seed.wrapping_add(1));
    let mut placements = placements;
    let mut summary = SessionSummary::default();

    info!(
        days = session.days,
        instances = placements.len(),
        minutes_per_tick = session.minutes_per_tick,
        "Session started"
    );

    while world.clock.day() < end_day {
        let now = world.clock.advance(session.minutes_per_tick)?;
        summary.ticks = summary.ticks.saturating_add(1);
        // A closed receiver only means the sweeper already stopped.
        let _ = time_tx.send(now);

        let environment = world.sources().sample(now);
        let mut orch = orchestrator.lock().await;
        for placement in &mut placements {
            let tool = pick_tool(placement.required_tool, &mut rng);
            let request = GatherRequest {
                instance_id: placement.instance_id,
                node_id: placement.node_id.clone(),
                tool,
                tool_grade: session.tool_grade,
                environment: environment.clone(),
            };
            match orch.gather(&request, &mut *bag) {
                Ok(result) => {
                    summary.gathers = summary.gathers.saturating_add(1);
                    let lost: u32 = result
                        .lost_items()
                        .fold(0_u32, |total, grant| total.saturating_add(grant.count));
                    summary.items_lost = summary.items_lost.saturating_add(u64::from(lost));
                    if result.depleted {
                        summary.depleted = summary.depleted.saturating_add(1);
                        orch.forget_instance(placement.instance_id);
                        *placement = placement.respawned();
                        debug!(
                            node = %placement.node_id,
                            instance = %placement.instance_id,
                            "Depleted instance replaced"
                        );
                    }
                }
                Err(rejection) => record_rejection(&mut summary, &rejection),
            }
        }
        drop(orch);

        if session.tick_interval_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(session.tick_interval_ms)).await;
        } else {
            // Let the sweeper see this tick before the next one.
            tokio::task::yield_now().await;
        }
    }

    drop(time_tx);
    summary.claims_swept = sweeper.await.map_err(|e| EngineError::Task {
        message: format!("sweep task failed: {e}"),
    })?;

    summary.ended_at = world.clock.now();
    summary.levels = orchestrator.lock().await.ledger().levels();
    summary.inventory = bag
        .list()
        .into_iter()
        .map(|(item, qty)| (item.as_str().to_owned(), qty))
        .collect();

    info!(
        ticks = summary.ticks,
        gathers = summary.gathers,
        depleted = summary.depleted,
        items_lost = summary.items_lost,
        claims_swept = summary.claims_swept,
        ended_at = %summary.ended_at,
        "Session finished"
    );
    Ok(summary)
}

/// Sweep daily claims each time in-game time crosses the next sweep mark.
/// Returns the total number of claims cleared once the sender is dropped.
fn spawn_sweeper(
    orchestrator: Arc<Mutex<GatherOrchestrator>>,
    mut time_rx: watch::Receiver<GameTime>,
    interval_minutes: u64,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let interval = interval_minutes.max(1);
        let mut next_sweep = time_rx.borrow().checked_add_minutes(interval);
        let mut cleared_total: u64 = 0;

        while time_rx.changed().await.is_ok() {
            let now = *time_rx.borrow_and_update();
            if next_sweep.is_some_and(|mark| now < mark) {
                continue;
            }
            let cleared = orchestrator.lock().await.sweep(now);
            cleared_total = cleared_total.saturating_add(u64::try_from(cleared).unwrap_or(u64::MAX));
            if cleared > 0 {
                debug!(cleared, at = %now, "Sweep cleared daily claims");
            }
            next_sweep = now.checked_add_minutes(interval);
        }
        cleared_total
    })
}

fn pick_tool(required: ToolType, rng: &mut impl Rng) -> ToolType {
    if rng.random_range(0..100) < FUMBLE_PERCENT {
        let index = rng.random_range(0..TOOLS.len());
        TOOLS.get(index).copied().unwrap_or(required)
    } else {
        required
    }
}

fn record_rejection(summary: &mut SessionSummary, rejection: &GatherRejection) {
    let count = summary.rejections.entry(rejection.reason()).or_default();
    *count = count.saturating_add(1);
}

#[cfg(test)]
mod tests {
    use forage_core::GameClock;
    use forage_core::config::{ClockConfig, GatherConfig};
    use forage_world::create_starting_catalog;

    use super::*;
    use crate::spawner::spawn_instances;

    #[tokio::test]
    async fn short_session_gathers_and_sweeps() {
        let (catalog, rarity) = create_starting_catalog().unwrap_or_default();
        let catalog = Arc::new(catalog);
        let session = SessionConfig {
            days: 3,
            tick_interval_ms: 0,
            ..SessionConfig::default()
        };
        let placements = spawn_instances(&catalog, 2);
        let orchestrator = Arc::new(Mutex::new(GatherOrchestrator::new(
            Arc::clone(&catalog),
            rarity,
            &GatherConfig::default(),
            session.seed,
        )));
        let clock = GameClock::new(&ClockConfig::default());
        assert!(clock.is_ok());
        let Ok(clock) = clock else { return };
        let mut world = SessionWorld::new(clock, &session);
        let mut bag = Bag::new(64, u32::MAX);

        let summary = run_session(
            Arc::clone(&orchestrator),
            &mut world,
            placements,
            &mut bag,
            &session,
            &SweepConfig::default(),
        )
        .await;
        assert!(summary.is_ok(), "{summary:?}");
        let summary = summary.unwrap_or_default();

        assert!(summary.gathers > 0);
        assert!(summary.depleted > 0);
        assert!(summary.claims_swept > 0);
        assert_eq!(summary.items_lost, 0);
        assert!(!summary.inventory.is_empty());
        assert_eq!(summary.ended_at.day(), 3);
        assert!(
            summary
                .rejections
                .get(&RejectionReason::NotAvailable)
                .is_some_and(|n| *n > 0)
        );
    }

    #[test]
    fn pick_tool_usually_picks_the_right_one() {
        let mut rng = SmallRng::seed_from_u64(3);
        let right = (0..1000)
            .filter(|_| pick_tool(ToolType::Axe, &mut rng) == ToolType::Axe)
            .count();
        assert!(right >= 900, "{right}");
    }
}
