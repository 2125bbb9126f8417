//! Drop table evaluation.
//!
//! Turns a node definition plus a [`GatherContext`] into concrete item
//! quantities and an XP amount. Pure apart from the injected RNG: the same
//! inputs with the same RNG state always produce the same outcome.
//!
//! # Algorithm
//!
//! 1. Base drops whose conditions pass are always included, with a quantity
//!    rolled uniformly in `[min_qty, max_qty]`.
//! 2. Bonus drops whose conditions pass are included iff a uniform draw in
//!    `[0, 100)` falls below the effective chance. An entry that requires
//!    bonus success gets `min(chance * 1.5, 100)` when the round succeeded.
//! 3. Golden items have their rolled quantity doubled.
//! 4. XP is `floor(xp_reward * (1 + min(level * 0.01, 0.20)))` using the
//!    skill level of the node's category.
//!
//! Output keeps drop-table order (base then bonus). Entries for the same
//! item are not merged. Zero quantities are omitted.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use forage_skills::effects;
use forage_types::{DropConditions, DropEntry, GatherContext, ItemId, NodeCategory, NodeDefinition};
use forage_world::RarityTable;

use crate::chance;

/// Boost applied to bonus-success entries when the round succeeded (1.5).
pub const BONUS_SUCCESS_BOOST: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Upper bound on any chance, in percent.
const MAX_CHANCE_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Multiplier applied to golden item quantities.
const GOLDEN_MULTIPLIER: u32 = 2;

/// Items and XP produced by one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropOutcome {
    /// Rolled items in drop-table order.
    pub items: Vec<(ItemId, u32)>,
    /// XP earned.
    pub xp: u32,
    /// Echo of the context's bonus-success flag.
    pub bonus_success: bool,
}

/// Evaluate a node's drop table against `ctx`.
pub fn evaluate(
    definition: &NodeDefinition,
    ctx: &GatherContext,
    rarity: &RarityTable,
    rng: &mut impl Rng,
) -> DropOutcome {
    let mut items = Vec::new();

    for entry in &definition.base_drops {
        if !entry_passes(entry, ctx, definition.category) {
            continue;
        }
        push_rolled(&mut items, entry, rarity, rng);
    }

    for entry in &definition.bonus_drops {
        if !entry_passes(entry, ctx, definition.category) {
            continue;
        }
        let chance = effective_chance(entry, ctx.bonus_success);
        if chance::hits(chance, 100, rng) {
            push_rolled(&mut items, entry, rarity, rng);
        }
    }

    let xp = compute_xp(definition.xp_reward, ctx.skill_level(definition.category));

    debug!(
        node = %definition.node_id,
        item_lines = items.len(),
        xp,
        bonus_success = ctx.bonus_success,
        "Drop table evaluated"
    );

    DropOutcome {
        items,
        xp,
        bonus_success: ctx.bonus_success,
    }
}

/// Chance in percent after the bonus-success boost.
pub fn effective_chance(entry: &DropEntry, bonus_success: bool) -> Decimal {
    if entry.requires_bonus_success() && bonus_success {
        entry
            .chance_percent
            .checked_mul(BONUS_SUCCESS_BOOST)
            .map_or(MAX_CHANCE_PERCENT, |boosted| boosted.min(MAX_CHANCE_PERCENT))
    } else {
        entry.chance_percent
    }
}

/// XP for a harvest: `floor(base * (1 + min(level * 0.01, 0.20)))`.
pub fn compute_xp(base: u32, skill_level: u32) -> u32 {
    let multiplier = Decimal::ONE
        .checked_add(effects::xp_bonus(skill_level))
        .unwrap_or(Decimal::ONE);
    Decimal::from(base)
        .checked_mul(multiplier)
        .and_then(|xp| xp.floor().to_u32())
        .unwrap_or(base)
}

/// Whether every set condition holds. Absent context values fail closed.
pub fn conditions_pass(
    conditions: &DropConditions,
    ctx: &GatherContext,
    category: NodeCategory,
) -> bool {
    conditions
        .weather
        .is_none_or(|weather| ctx.weather == Some(weather))
        && conditions
            .season
            .is_none_or(|season| ctx.season == Some(season))
        && conditions
            .min_town_level
            .is_none_or(|min| ctx.town_level.is_some_and(|level| level >= min))
        && conditions
            .min_skill_level
            .is_none_or(|min| ctx.skill_level(category) >= min)
        && conditions
            .min_tool_grade
            .is_none_or(|min| ctx.tool_grade >= min)
        && (!conditions.requires_first_daily_harvest || ctx.first_daily_harvest)
        && (!conditions.requires_bonus_success || ctx.bonus_success)
        && conditions
            .event_id
            .as_deref()
            .is_none_or(|event| ctx.event_id.as_deref() == Some(event))
        && conditions
            .min_museum_completion
            .is_none_or(|min| ctx.museum_completion.is_some_and(|pct| pct >= min))
}

fn entry_passes(entry: &DropEntry, ctx: &GatherContext, category: NodeCategory) -> bool {
    entry
        .conditions
        .as_ref()
        .is_none_or(|conditions| conditions_pass(conditions, ctx, category))
}

fn push_rolled(
    items: &mut Vec<(ItemId, u32)>,
    entry: &DropEntry,
    rarity: &RarityTable,
    rng: &mut impl Rng,
) {
    let low = entry.min_qty.min(entry.max_qty);
    let high = entry.min_qty.max(entry.max_qty);
    let mut quantity = rng.random_range(low..=high);
    if rarity.is_golden(&entry.item_id) {
        quantity = quantity.saturating_mul(GOLDEN_MULTIPLIER);
    }
    if quantity > 0 {
        items.push((entry.item_id.clone(), quantity));
    }
}
