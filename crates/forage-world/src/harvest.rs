//! Per-instance harvest state: harvest counts, cooldowns, daily claims, and
//! depletion.
//!
//! State is keyed by [`InstanceId`], one entry per placed world object, and
//! is created lazily the first time an instance is harvested. The catalog's
//! [`RespawnPolicy`] decides when an instance may be harvested again:
//!
//! - `Time { minutes }` -- available once `now >= last_harvested_at + minutes`.
//!   Nothing is cached; availability is computed on every query.
//! - `Daily { reset_hour }` -- a harvest sets `daily_claimed`, which blocks
//!   the instance until the first `reset_hour:00` after the claim. The
//!   periodic [`HarvestStateTracker::sweep`] clears expired claims.
//!
//! Whatever the policy, an instance that reaches [`MAX_HARVESTS`] is
//! depleted for good. Nothing in this module ever clears depletion; the host
//! spawns a new instance id if the object should come back.
//!
//! ```text
//! Fresh -> Available <-> OnCooldown -> ... -> Depleted (harvest_count = 3)
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use forage_types::{
    GameTime, HarvestPhase, HarvestState, InstanceId, MAX_HARVESTS, NodeId, RespawnPolicy,
};

use crate::catalog::NodeCatalog;
use crate::error::WorldError;

/// Outcome of [`HarvestStateTracker::record_harvest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestRecord {
    /// True iff this harvest brought the instance to [`MAX_HARVESTS`].
    pub depleted: bool,
    /// Harvest count after this harvest.
    pub harvest_count: u8,
}

/// Tracks harvest state for every instance that has been harvested.
#[derive(Debug, Clone)]
pub struct HarvestStateTracker {
    catalog: Arc<NodeCatalog>,
    states: BTreeMap<InstanceId, HarvestState>,
}

impl HarvestStateTracker {
    /// Create a tracker with no instance state.
    pub const fn new(catalog: Arc<NodeCatalog>) -> Self {
        Self {
            catalog,
            states: BTreeMap::new(),
        }
    }

    /// Whether `instance` can be harvested at `now`.
    ///
    /// A never-harvested instance is always available.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NodeNotFound`] if `node_id` is not in the catalog.
    pub fn is_available(
        &self,
        instance: InstanceId,
        node_id: &NodeId,
        now: GameTime,
    ) -> Result<bool, WorldError> {
        let definition = self.catalog.require(node_id)?;
        Ok(self
            .states
            .get(&instance)
            .is_none_or(|state| is_ready(state, definition.respawn, now)))
    }

    /// Record a harvest of `instance` at `now`.
    ///
    /// Increments the harvest count and stamps the harvest time. On the
    /// final harvest the instance becomes depleted; otherwise daily nodes are
    /// marked claimed and time nodes start their cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NodeNotFound`] for an unregistered node,
    /// [`WorldError::InstanceDepleted`] if the instance is already depleted,
    /// or [`WorldError::ArithmeticOverflow`] if the count cannot advance.
    pub fn record_harvest(
        &mut self,
        instance: InstanceId,
        node_id: &NodeId,
        now: GameTime,
    ) -> Result<HarvestRecord, WorldError> {
        let respawn = self.catalog.require(node_id)?.respawn;
        let state = self
            .states
            .entry(instance)
            .or_insert_with(|| HarvestState::fresh(instance, node_id.clone()));

        if state.depleted {
            return Err(WorldError::InstanceDepleted(instance));
        }

        let count = state
            .harvest_count
            .checked_add(1)
            .ok_or(WorldError::ArithmeticOverflow)?;
        state.harvest_count = count;
        state.last_harvested_at = Some(now);

        let depleted = count >= MAX_HARVESTS;
        if depleted {
            state.depleted = true;
            state.daily_claimed = false;
        } else if matches!(respawn, RespawnPolicy::Daily { .. }) {
            state.daily_claimed = true;
        }

        debug!(
            %instance,
            node = %node_id,
            harvest_count = count,
            depleted,
            at = %now,
            "Harvest recorded"
        );

        Ok(HarvestRecord {
            depleted,
            harvest_count: count,
        })
    }

    /// Clear daily claims whose reset hour has passed since they were set.
    ///
    /// Time-policy instances need no sweeping. Depleted instances are never
    /// touched. Returns the number of claims cleared.
    pub fn sweep(&mut self, now: GameTime) -> usize {
        let mut cleared: usize = 0;
        for state in self.states.values_mut() {
            if !state.daily_claimed || state.depleted {
                continue;
            }
            let Some(definition) = self.catalog.get(&state.node_id) else {
                warn!(
                    instance = %state.instance_id,
                    node = %state.node_id,
                    "Daily claim references a node missing from the catalog"
                );
                continue;
            };
            let RespawnPolicy::Daily { reset_hour } = definition.respawn else {
                state.daily_claimed = false;
                continue;
            };
            if daily_reset_reached(state, reset_hour, now) {
                state.daily_claimed = false;
                cleared = cleared.saturating_add(1);
            }
        }
        if cleared > 0 {
            debug!(cleared, at = %now, "Daily claims reset");
        }
        cleared
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
        let definition = self.catalog.require(node_id)?;
        let Some(state) = self.states.get(&instance) else {
            return Ok(HarvestPhase::Fresh);
        };
        Ok(if state.depleted {
            HarvestPhase::Depleted
        } else if is_ready(state, definition.respawn, now) {
            if state.harvest_count == 0 {
                HarvestPhase::Fresh
            } else {
                HarvestPhase::Available
            }
        } else {
            HarvestPhase::OnCooldown
        })
    }

    /// Current state of an instance, if it has ever been harvested.
    pub fn state(&self, instance: InstanceId) -> Option<&HarvestState> {
        self.states.get(&instance)
    }

    /// Drop the state of an instance whose world object was removed.
    pub fn forget(&mut self, instance: InstanceId) -> Option<HarvestState> {
        self.states.remove(&instance)
    }

    /// All tracked states, in instance order.
    pub fn states(&self) -> impl Iterator<Item = &HarvestState> {
        self.states.values()
    }

    /// Replace all tracked state, e.g. when loading a save.
    pub fn restore(&mut self, states: impl IntoIterator<Item = HarvestState>) {
        self.states = states
            .into_iter()
            .map(|state| (state.instance_id, state))
            .collect();
    }

    /// Number of tracked instances.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no instance has been harvested yet.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The catalog this tracker reads respawn rules from.
    pub fn catalog(&self) -> &Arc<NodeCatalog> {
        &self.catalog
    }
}

fn is_ready(state: &HarvestState, respawn: RespawnPolicy, now: GameTime) -> bool {
    if state.depleted || state.harvest_count >= MAX_HARVESTS {
        return false;
    }
    let Some(last) = state.last_harvested_at else {
        return true;
    };
    match respawn {
        RespawnPolicy::Time { minutes } => last
            .checked_add_minutes(minutes)
            .is_some_and(|ready_at| now >= ready_at),
        RespawnPolicy::Daily { reset_hour } => {
            !state.daily_claimed || daily_reset_reached(state, reset_hour, now)
        }
    }
}

fn daily_reset_reached(state: &HarvestState, reset_hour: u8, now: GameTime) -> bool {
    state
        .last_harvested_at
        .and_then(|claimed_at| claimed_at.next_reset_after(reset_hour))
        .is_none_or(|reset_at| now >= reset_at)
}
