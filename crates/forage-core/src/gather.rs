//! The gather pipeline.
//!
//! [`GatherOrchestrator`] runs one harvest end to end:
//!
//! 1. Catalog lookup ([`GatherRejection::UnknownNode`])
//! 2. Availability check ([`GatherRejection::NotAvailable`])
//! 3. Tool check, exact match ([`GatherRejection::WrongTool`])
//! 4. Bonus round, only for nodes that have one
//! 5. Context assembly (environment, skill levels, first harvest of the day)
//! 6. Drop evaluation
//! 7. Inventory deposit, item by item
//! 8. XP credit
//! 9. Harvest bookkeeping
//!
//! Steps 1--3 change nothing, so a rejected request can be retried freely.
//! From step 4 on everything is committed: a refused deposit loses that item
//! (and says so in the result) but never undoes the harvest.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use forage_skills::{InventorySink, SkillLedger, effects};
use forage_types::{
    GameTime, GatherContext, GatherRequest, GatherResult, HarvestPhase, InstanceId, ItemGrant,
    NodeId, RejectionReason, ToolType,
};
use forage_world::{HarvestRecord, HarvestStateTracker, NodeCatalog, RarityTable, WorldError};

use crate::bonus::{BonusModifier, BonusRoll};
use crate::config::GatherConfig;
use crate::drops;
use crate::snapshot::ProgressSnapshot;

/// Why a gather request was turned away. Rejections have no side effects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatherRejection {
    /// The node id is not in the catalog.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The instance is on cooldown, claimed for today, or depleted.
    #[error("instance {instance} of {node} is not available")]
    NotAvailable {
        /// The instance requested.
        instance: InstanceId,
        /// Its node kind.
        node: NodeId,
    },

    /// The tool in hand is not the one the node requires.
    #[error("{node} requires {required:?}, got {supplied:?}")]
    WrongTool {
        /// The node requested.
        node: NodeId,
        /// Tool the node requires.
        required: ToolType,
        /// Tool the caller supplied.
        supplied: ToolType,
    },
}

impl GatherRejection {
    /// Serializable reason for the UI.
    pub const fn reason(&self) -> RejectionReason {
        match self {
            Self::UnknownNode(_) => RejectionReason::UnknownNode,
            Self::NotAvailable { .. } => RejectionReason::NotAvailable,
            Self::WrongTool { .. } => RejectionReason::WrongTool,
        }
    }
}

/// Owns all gathering state for one player and runs the gather pipeline.
///
/// All mutation goes through `&mut self`, so one writer at a time is
/// enforced by the borrow checker. Hosts that share it across tasks wrap it
/// in a mutex.
#[derive(Debug, Clone)]
pub struct GatherOrchestrator {
    catalog: Arc<NodeCatalog>,
    tracker: HarvestStateTracker,
    ledger: SkillLedger,
    rarity: RarityTable,
    /// Last in-game day each node kind was harvested, anywhere.
    last_harvest_day: BTreeMap<NodeId, u64>,
    bonus_chance: Decimal,
    rng: SmallRng,
}

impl GatherOrchestrator {
    /// Create an orchestrator with fresh progress.
    pub fn new(catalog: Arc<NodeCatalog>, rarity: RarityTable, config: &GatherConfig, seed: u64) -> Self {
        Self {
            tracker: HarvestStateTracker::new(Arc::clone(&catalog)),
            catalog,
            ledger: SkillLedger::new(),
            rarity,
            last_harvest_day: BTreeMap::new(),
            bonus_chance: config.bonus_chance(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Attempt to harvest one instance.
    ///
    /// # Errors
    ///
    /// Returns a [`GatherRejection`] if the node is unknown, the instance is
    /// not available, or the wrong tool was supplied. Nothing is changed in
    /// that case.
    pub fn gather(
        &mut self,
        request: &GatherRequest,
        inventory: &mut dyn InventorySink,
    ) -> Result<GatherResult, GatherRejection> {
        let now = request.environment.time;
        let catalog = Arc::clone(&self.catalog);

        let Some(definition) = catalog.get(&request.node_id) else {
            warn!(
                node = %request.node_id,
                instance = %request.instance_id,
                "Gather requested for unknown node"
            );
            return Err(GatherRejection::UnknownNode(request.node_id.clone()));
        };

        match self
            .tracker
            .is_available(request.instance_id, &request.node_id, now)
        {
            Ok(true) => {}
            Ok(false) => {
                debug!(
                    node = %request.node_id,
                    instance = %request.instance_id,
                    at = %now,
                    "Gather rejected: not available"
                );
                return Err(GatherRejection::NotAvailable {
                    instance: request.instance_id,
                    node: request.node_id.clone(),
                });
            }
            Err(error) => {
                warn!(node = %request.node_id, %error, "Availability check failed");
                return Err(GatherRejection::UnknownNode(request.node_id.clone()));
            }
        }

        if request.tool != definition.required_tool {
            debug!(
                node = %request.node_id,
                required = ?definition.required_tool,
                supplied = ?request.tool,
                "Gather rejected: wrong tool"
            );
            return Err(GatherRejection::WrongTool {
                node: request.node_id.clone(),
                required: definition.required_tool,
                supplied: request.tool,
            });
        }

        // Committed from here on.
        let bonus = if definition.has_bonus_round {
            BonusModifier::roll(self.bonus_chance, &mut self.rng)
        } else {
            BonusRoll::skipped()
        };

        let today = now.day();
        let environment = &request.environment;
        let ctx = GatherContext {
            weather: environment.weather,
            season: environment.season,
            town_level: environment.town_level,
            skill_levels: self.ledger.levels(),
            tool_grade: request.tool_grade,
            first_daily_harvest: self.last_harvest_day.get(&request.node_id) != Some(&today),
            bonus_success: bonus.success,
            event_id: environment.event_id.clone(),
            museum_completion: environment.museum_completion,
        };
        let harvest_level = ctx.skill_level(definition.category);

        let outcome = drops::evaluate(definition, &ctx, &self.rarity, &mut self.rng);

        let items: Vec<ItemGrant> = outcome
            .items
            .into_iter()
            .map(|(item_id, count)| {
                let deposited = match inventory.add(&item_id, count) {
                    Ok(()) => true,
                    Err(error) => {
                        warn!(
                            item = %item_id,
                            count,
                            %error,
                            "Inventory refused gathered item; item lost"
                        );
                        false
                    }
                };
                ItemGrant {
                    item_id,
                    count,
                    deposited,
                }
            })
            .collect();

        let leveled_up = match self.ledger.add_xp(definition.category, outcome.xp) {
            Ok(level) => level,
            Err(error) => {
                warn!(category = %definition.category, xp = outcome.xp, %error, "XP credit failed");
                None
            }
        };

        let record = self
            .tracker
            .record_harvest(request.instance_id, &request.node_id, now)
            .unwrap_or_else(|error| {
                warn!(instance = %request.instance_id, %error, "Harvest bookkeeping failed");
                HarvestRecord {
                    depleted: false,
                    harvest_count: self
                        .tracker
                        .state(request.instance_id)
                        .map_or(0, |state| state.harvest_count),
                }
            });
        self.last_harvest_day.insert(request.node_id.clone(), today);

        if let Some(level) = leveled_up {
            info!(category = %definition.category, level, "Skill level up");
        }
        debug!(
            node = %request.node_id,
            instance = %request.instance_id,
            items = items.len(),
            xp = outcome.xp,
            bonus = bonus.success,
            harvest_count = record.harvest_count,
            depleted = record.depleted,
            "Gather complete"
        );

        Ok(GatherResult {
            instance_id: request.instance_id,
            node_id: request.node_id.clone(),
            items,
            xp_gained: outcome.xp,
            bonus_success: bonus.success,
            bonus_multiplier: bonus.multiplier,
            depleted: record.depleted,
            harvest_count: record.harvest_count,
            leveled_up,
            skill_effects: effects::for_level(harvest_level),
        })
    }

    /// Clear expired daily claims. Returns the number cleared.
    pub fn sweep(&mut self, now: GameTime) -> usize {
        self.tracker.sweep(now)
    }

    /// Drop the state of an instance whose world object was removed.
    /// Returns whether the instance was tracked.
    pub fn forget_instance(&mut self, instance: InstanceId) -> bool {
        self.tracker.forget(instance).is_some()
    }

    /// Lifecycle phase of an instance at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NodeNotFound`] if `node_id` is not in the catalog.
    pub fn phase(
        &self,
        instance: InstanceId,
        node_id: &NodeId,
        now: GameTime,
    ) -> Result<HarvestPhase, WorldError> {
        self.tracker.phase(instance, node_id, now)
    }

    /// The skill ledger.
    pub const fn ledger(&self) -> &SkillLedger {
        &self.ledger
    }

    /// The harvest-state tracker.
    pub const fn tracker(&self) -> &HarvestStateTracker {
        &self.tracker
    }

    /// The node catalog.
    pub const fn catalog(&self) -> &Arc<NodeCatalog> {
        &self.catalog
    }

    /// Bonus-round base chance as a fraction.
    pub const fn bonus_chance(&self) -> Decimal {
        self.bonus_chance
    }

    /// Capture progress for persistence.
    pub fn snapshot(&self, saved_at: DateTime<Utc>) -> ProgressSnapshot {
        ProgressSnapshot {
            saved_at,
            skills: self.ledger.records().clone(),
            harvest_states: self.tracker.states().cloned().collect(),
            last_harvest_days: self.last_harvest_day.clone(),
        }
    }

    /// Replace progress with a saved snapshot.
    pub fn restore(&mut self, snapshot: ProgressSnapshot) {
        info!(
            saved_at = %snapshot.saved_at,
            instances = snapshot.harvest_states.len(),
            "Restoring progress"
        );
        self.ledger = SkillLedger::from_records(snapshot.skills);
        self.tracker.restore(snapshot.harvest_states);
        self.last_harvest_day = snapshot.last_harvest_days;
    }
}
