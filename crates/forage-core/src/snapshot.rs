//! Progress snapshots for cross-session persistence.
//!
//! The core does no I/O of its own. A [`ProgressSnapshot`] is an opaque
//! structured record the host stores wherever it keeps saves; JSON helpers
//! are provided because that is what the engine binary writes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forage_types::{HarvestState, NodeCategory, NodeId, SkillRecord};

/// Errors from snapshot encoding.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// JSON encoding or decoding failed.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything about a player's foraging progress that outlives a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// When the snapshot was taken (wall clock).
    pub saved_at: DateTime<Utc>,
    /// Skill record per trained category.
    pub skills: BTreeMap<NodeCategory, SkillRecord>,
    /// State of every tracked harvest instance.
    pub harvest_states: Vec<HarvestState>,
    /// Last in-game day each node kind was harvested.
    pub last_harvest_days: BTreeMap<NodeId, u64>,
}

impl ProgressSnapshot {
    /// Encode as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if the input is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use forage_types::{GameTime, InstanceId};

    use super::*;

    fn sample() -> ProgressSnapshot {
        let mut skills = BTreeMap::new();
        skills.insert(NodeCategory::Wood, SkillRecord { level: 3, xp: 40 });
        let mut state = HarvestState::fresh(InstanceId::new(), NodeId::from("node_tree_oak"));
        state.harvest_count = 2;
        state.last_harvested_at = Some(GameTime::from_minutes(700));
        let mut days = BTreeMap::new();
        days.insert(NodeId::from("node_tree_oak"), 0);
        ProgressSnapshot {
            saved_at: DateTime::<Utc>::UNIX_EPOCH,
            skills,
            harvest_states: vec![state],
            last_harvest_days: days,
        }
    }

    #[test]
    fn json_round_trip_preserves_progress() {
        let snapshot = sample();
        let json = snapshot.to_json();
        assert!(json.is_ok());
        let decoded = json.ok().and_then(|s| ProgressSnapshot::from_json(&s).ok());
        assert_eq!(decoded, Some(snapshot));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            ProgressSnapshot::from_json("{\"skills\": 3}"),
            Err(SnapshotError::Json(_))
        ));
    }
}
