//! Core data model: node definitions, drop entries, per-instance harvest
//! state, skill records, and the per-call context and result records.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{NodeCategory, Season, ToolType, Weather};
use crate::ids::{InstanceId, ItemId, NodeId};
use crate::time::GameTime;

/// Harvests after which an instance is permanently depleted.
pub const MAX_HARVESTS: u8 = 3;

/// Skill level assumed for a category the player has never trained.
pub const BASE_SKILL_LEVEL: u32 = 1;

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// How an instance becomes harvestable again between harvests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RespawnPolicy {
    /// Available again a fixed number of in-game minutes after a harvest.
    Time {
        /// Cooldown length in in-game minutes.
        minutes: u64,
    },
    /// Claimable once per in-game day, resetting at `reset_hour:00`.
    Daily {
        /// Hour of day (0--23) at which the daily claim clears.
        reset_hour: u8,
    },
}

/// Optional gates on a [`DropEntry`]. Every field that is set must pass;
/// unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export, export_to = "bindings/")]
pub struct DropConditions {
    /// Required current weather.
    pub weather: Option<Weather>,
    /// Required current season.
    pub season: Option<Season>,
    /// Minimum town level.
    pub min_town_level: Option<u32>,
    /// Minimum skill level in the node's category.
    pub min_skill_level: Option<u32>,
    /// Minimum tool grade.
    pub min_tool_grade: Option<u32>,
    /// Only drops on the first harvest of this node kind today.
    pub requires_first_daily_harvest: bool,
    /// Only drops when the bonus round succeeded.
    pub requires_bonus_success: bool,
    /// Only drops while this event is active.
    pub event_id: Option<String>,
    /// Minimum museum completion percentage (0--100).
    pub min_museum_completion: Option<u32>,
}

/// One row of a drop table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DropEntry {
    /// Item granted when the row is included.
    pub item_id: ItemId,
    /// Inclusive lower bound of the rolled quantity.
    pub min_qty: u32,
    /// Inclusive upper bound of the rolled quantity.
    pub max_qty: u32,
    /// Inclusion chance for bonus rows, 0--100. Ignored for base rows.
    #[ts(as = "String")]
    #[serde(default = "full_chance")]
    pub chance_percent: Decimal,
    /// Gates evaluated against the gather context.
    #[serde(default)]
    pub conditions: Option<DropConditions>,
}

const fn full_chance() -> Decimal {
    Decimal::ONE_HUNDRED
}

impl DropEntry {
    /// A row that always drops `min..=max` of `item` once its conditions pass.
    pub fn guaranteed(item: impl Into<ItemId>, min_qty: u32, max_qty: u32) -> Self {
        Self {
            item_id: item.into(),
            min_qty,
            max_qty,
            chance_percent: Decimal::ONE_HUNDRED,
            conditions: None,
        }
    }

    /// A row included with `chance_percent` probability.
    pub fn with_chance(
        item: impl Into<ItemId>,
        min_qty: u32,
        max_qty: u32,
        chance_percent: Decimal,
    ) -> Self {
        Self {
            item_id: item.into(),
            min_qty,
            max_qty,
            chance_percent,
            conditions: None,
        }
    }

    /// Attach gating conditions.
    #[must_use]
    pub fn when(mut self, conditions: DropConditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    /// Gate this row on a successful bonus round, keeping any other
    /// conditions.
    #[must_use]
    pub fn requiring_bonus(mut self) -> Self {
        self.conditions
            .get_or_insert_with(DropConditions::default)
            .requires_bonus_success = true;
        self
    }

    /// Whether this row only drops after a successful bonus round.
    pub fn requires_bonus_success(&self) -> bool {
        self.conditions
            .as_ref()
            .is_some_and(|c| c.requires_bonus_success)
    }
}

/// Catalog entry describing one kind of harvestable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NodeDefinition {
    /// Catalog key.
    pub node_id: NodeId,
    /// Name shown to the player.
    #[serde(default)]
    pub display_name: String,
    /// Skill category credited for harvests.
    pub category: NodeCategory,
    /// Tool that must be held to harvest.
    pub required_tool: ToolType,
    /// Cooldown rule between harvests.
    pub respawn: RespawnPolicy,
    /// Base XP before the skill bonus.
    pub xp_reward: u32,
    /// Rows rolled on every harvest (subject to conditions).
    #[serde(default)]
    pub base_drops: Vec<DropEntry>,
    /// Rows included by chance (subject to conditions).
    #[serde(default)]
    pub bonus_drops: Vec<DropEntry>,
    /// Whether a harvest triggers the bonus round.
    #[serde(default)]
    pub has_bonus_round: bool,
}

// ---------------------------------------------------------------------------
// Mutable state
// ---------------------------------------------------------------------------

/// Harvest bookkeeping for one placed world object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HarvestState {
    /// The placed object.
    pub instance_id: InstanceId,
    /// The catalog kind the object was resolved to.
    pub node_id: NodeId,
    /// Harvests so far, never above [`MAX_HARVESTS`].
    pub harvest_count: u8,
    /// When the last harvest happened.
    pub last_harvested_at: Option<GameTime>,
    /// Terminal flag, set on the final harvest.
    pub depleted: bool,
    /// Set after a harvest of a daily node until its reset hour passes.
    pub daily_claimed: bool,
}

impl HarvestState {
    /// A never-harvested instance.
    pub const fn fresh(instance_id: InstanceId, node_id: NodeId) -> Self {
        Self {
            instance_id,
            node_id,
            harvest_count: 0,
            last_harvested_at: None,
            depleted: false,
            daily_claimed: false,
        }
    }
}

/// Experience in one skill category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SkillRecord {
    /// Current level, 1--20.
    pub level: u32,
    /// XP accumulated toward the next level.
    pub xp: u32,
}

impl SkillRecord {
    /// XP needed to leave the current level: `100 * level`.
    pub const fn xp_to_next_level(&self) -> u32 {
        self.level.saturating_mul(100)
    }
}

impl Default for SkillRecord {
    fn default() -> Self {
        Self {
            level: BASE_SKILL_LEVEL,
            xp: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-call records
// ---------------------------------------------------------------------------

/// Environment values sampled by the host once per gather call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentSnapshot {
    /// Current in-game time.
    pub time: GameTime,
    /// Current weather, if the host tracks weather.
    pub weather: Option<Weather>,
    /// Current season, if the host tracks seasons.
    pub season: Option<Season>,
    /// Town level, if known.
    pub town_level: Option<u32>,
    /// Active event, if any.
    pub event_id: Option<String>,
    /// Museum completion percentage (0--100), if known.
    pub museum_completion: Option<u32>,
}

/// Everything a drop table is evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GatherContext {
    /// Current weather.
    pub weather: Option<Weather>,
    /// Current season.
    pub season: Option<Season>,
    /// Current town level.
    pub town_level: Option<u32>,
    /// Skill level per category.
    pub skill_levels: BTreeMap<NodeCategory, u32>,
    /// Grade of the tool in hand.
    pub tool_grade: u32,
    /// First harvest of this node kind on the current in-game day.
    pub first_daily_harvest: bool,
    /// Outcome of the bonus round (false when no round was played).
    pub bonus_success: bool,
    /// Active event.
    pub event_id: Option<String>,
    /// Museum completion percentage (0--100).
    pub museum_completion: Option<u32>,
}

impl GatherContext {
    /// Skill level for a category, defaulting to [`BASE_SKILL_LEVEL`].
    pub fn skill_level(&self, category: NodeCategory) -> u32 {
        self.skill_levels
            .get(&category)
            .copied()
            .unwrap_or(BASE_SKILL_LEVEL)
    }
}

/// A request to harvest one world object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GatherRequest {
    /// The placed object being harvested.
    pub instance_id: InstanceId,
    /// The catalog kind the host resolved the object to.
    pub node_id: NodeId,
    /// Tool in hand.
    pub tool: ToolType,
    /// Grade of the tool in hand.
    pub tool_grade: u32,
    /// Environment sampled for this call.
    pub environment: EnvironmentSnapshot,
}

/// One item line of a gather result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemGrant {
    /// Item granted.
    pub item_id: ItemId,
    /// Quantity rolled (after golden doubling).
    pub count: u32,
    /// Whether the inventory accepted it. `false` means the item was lost.
    pub deposited: bool,
}

/// Skill-derived modifiers the host applies to animation time, drop
/// displays, and tool wear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SkillEffects {
    /// Fractional reduction of harvest time, capped at 0.20.
    #[ts(as = "String")]
    pub time_reduction: Decimal,
    /// Fractional bonus to bonus-drop chance, capped at 0.10.
    #[ts(as = "String")]
    pub bonus_drop_chance: Decimal,
    /// Fractional reduction of tool durability loss, capped at 0.15.
    #[ts(as = "String")]
    pub durability_reduction: Decimal,
}

/// What a successful gather produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GatherResult {
    /// The harvested object.
    pub instance_id: InstanceId,
    /// Its catalog kind.
    pub node_id: NodeId,
    /// Items rolled, in drop-table order, with per-item deposit outcome.
    pub items: Vec<ItemGrant>,
    /// XP credited to the node's category.
    pub xp_gained: u32,
    /// Whether the bonus round succeeded.
    pub bonus_success: bool,
    /// Bonus round multiplier (1.0 when no round or a failed round).
    #[ts(as = "String")]
    pub bonus_multiplier: Decimal,
    /// True iff this call brought the harvest count to the maximum.
    pub depleted: bool,
    /// Harvest count after this call.
    pub harvest_count: u8,
    /// New level, if the XP deposit caused a level-up.
    pub leveled_up: Option<u32>,
    /// Skill effects for the category at the level used for this harvest.
    pub skill_effects: SkillEffects,
}

impl GatherResult {
    /// Items the inventory refused.
    pub fn lost_items(&self) -> impl Iterator<Item = &ItemGrant> {
        self.items.iter().filter(|grant| !grant.deposited)
    }

    /// Whether at least one item was refused by the inventory.
    pub fn is_partial_deposit(&self) -> bool {
        self.items.iter().any(|grant| !grant.deposited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_entry_defaults_to_full_chance() {
        let json = r#"{"item_id":"돌","min_qty":2,"max_qty":4}"#;
        let entry: Result<DropEntry, _> = serde_json::from_str(json);
        assert!(entry.is_ok());
        let entry = entry.ok();
        assert_eq!(
            entry.as_ref().map(|e| e.chance_percent),
            Some(Decimal::ONE_HUNDRED)
        );
        assert_eq!(entry.and_then(|e| e.conditions), None);
    }

    #[test]
    fn respawn_policy_is_tagged() {
        let daily = serde_json::to_string(&RespawnPolicy::Daily { reset_hour: 6 }).ok();
        assert_eq!(daily.as_deref(), Some(r#"{"kind":"daily","reset_hour":6}"#));
    }

    #[test]
    fn skill_record_threshold_scales_with_level() {
        let record = SkillRecord { level: 4, xp: 0 };
        assert_eq!(record.xp_to_next_level(), 400);
        assert_eq!(SkillRecord::default().xp_to_next_level(), 100);
    }

    #[test]
    fn context_defaults_skill_level_to_one() {
        let ctx = GatherContext::default();
        assert_eq!(ctx.skill_level(NodeCategory::Beach), BASE_SKILL_LEVEL);
    }

    #[test]
    fn lost_items_lists_refused_grants() {
        let result = GatherResult {
            instance_id: InstanceId::new(),
            node_id: NodeId::from("node_rock_stone"),
            items: vec![
                ItemGrant {
                    item_id: ItemId::from("돌"),
                    count: 3,
                    deposited: true,
                },
                ItemGrant {
                    item_id: ItemId::from("석탄"),
                    count: 1,
                    deposited: false,
                },
            ],
            xp_gained: 5,
            bonus_success: false,
            bonus_multiplier: Decimal::ONE,
            depleted: false,
            harvest_count: 1,
            leveled_up: None,
            skill_effects: SkillEffects::default(),
        };
        assert!(result.is_partial_deposit());
        let lost: Vec<_> = result.lost_items().map(|g| g.item_id.as_str()).collect();
        assert_eq!(lost, vec!["석탄"]);
    }
}
