//! Skill ledger: per-category levels, XP tracking, and derived effects.
//!
//! Each [`NodeCategory`] has its own skill track. Every successful harvest
//! credits XP to the harvested node's category, and accumulating enough XP
//! triggers a level-up.
//!
//! # Level-Up Formula
//!
//! XP required to advance from level N to level N+1 is `N * 100`. Level 1
//! to 2 requires 100 XP; level 2 to 3 requires 200 XP. Levels start at 1,
//! cap at [`MAX_SKILL_LEVEL`], and never decrease.
//!
//! # Skill Effects
//!
//! Levels feed read-only modifiers to other systems (see [`effects`]):
//! - Harvest XP bonus and harvest time reduction = `min(level * 0.01, 0.20)`
//! - Bonus-drop chance bonus = `min(level * 0.005, 0.10)`
//! - Tool durability reduction = `min(level * 0.0075, 0.15)`
//!
//! The ledger never applies these itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use forage_types::{BASE_SKILL_LEVEL, NodeCategory, SkillEffects, SkillRecord};

use crate::error::SkillError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum skill level.
pub const MAX_SKILL_LEVEL: u32 = 20;

/// XP per level step: leaving level N costs `N * XP_PER_LEVEL_STEP`.
pub const XP_PER_LEVEL_STEP: u32 = 100;

// ---------------------------------------------------------------------------
// SkillLedger
// ---------------------------------------------------------------------------

/// Per-category skill tracking with XP accumulation and level-up mechanics.
///
/// Categories that were never trained have no record and read as level 1
/// with 0 XP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLedger {
    records: BTreeMap<NodeCategory, SkillRecord>,
}

impl SkillLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Create a ledger from saved records.
    pub const fn from_records(records: BTreeMap<NodeCategory, SkillRecord>) -> Self {
        Self { records }
    }

    /// Current level in a category (1 if never trained).
    pub fn get_level(&self, category: NodeCategory) -> u32 {
        self.records
            .get(&category)
            .map_or(BASE_SKILL_LEVEL, |record| record.level)
    }

    /// Current XP toward the next level in a category.
    pub fn get_xp(&self, category: NodeCategory) -> u32 {
        self.records.get(&category).map_or(0, |record| record.xp)
    }

    /// Full record for a category.
    pub fn record(&self, category: NodeCategory) -> SkillRecord {
        self.records.get(&category).copied().unwrap_or_default()
    }

    /// XP needed to leave the current level, or `None` at [`MAX_SKILL_LEVEL`].
    pub fn xp_for_next_level(&self, category: NodeCategory) -> Option<u32> {
        let level = self.get_level(category);
        if level >= MAX_SKILL_LEVEL {
            return None;
        }
        level.checked_mul(XP_PER_LEVEL_STEP)
    }

    /// Add XP to a category.
    ///
    /// Level-ups loop, so one large grant can cross several levels. Leftover
    /// XP carries into the new level. At [`MAX_SKILL_LEVEL`] residual XP is
    /// discarded.
    ///
    /// Returns `Some(new_level)` if the category leveled up, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::ArithmeticOverflow`] if the XP total overflows.
    pub fn add_xp(&mut self, category: NodeCategory, amount: u32) -> Result<Option<u32>, SkillError> {
        if amount == 0 {
            return Ok(None);
        }

        // Work on a copy; the ledger only changes if every step succeeds.
        let mut record = self.record(category);

        if record.level >= MAX_SKILL_LEVEL {
            return Ok(None);
        }

        record.xp = record
            .xp
            .checked_add(amount)
            .ok_or_else(|| SkillError::ArithmeticOverflow {
                context: format!("XP overflow for {category}"),
            })?;

        let original_level = record.level;
        loop {
            if record.level >= MAX_SKILL_LEVEL {
                record.xp = 0;
                break;
            }

            let threshold = record.xp_to_next_level();
            if record.xp < threshold {
                break;
            }

            record.xp = record
                .xp
                .checked_sub(threshold)
                .ok_or_else(|| SkillError::ArithmeticOverflow {
                    context: format!("XP subtraction overflow for {category}"),
                })?;
            record.level = record
                .level
                .checked_add(1)
                .ok_or_else(|| SkillError::ArithmeticOverflow {
                    context: format!("level increment overflow for {category}"),
                })?;
        }

        self.records.insert(category, record);

        if record.level > original_level {
            debug!(
                category = %category,
                from = original_level,
                to = record.level,
                "skill leveled up"
            );
            Ok(Some(record.level))
        } else {
            Ok(None)
        }
    }

    /// Level for every category, including untrained ones at level 1.
    pub fn levels(&self) -> BTreeMap<NodeCategory, u32> {
        NodeCategory::ALL
            .into_iter()
            .map(|category| (category, self.get_level(category)))
            .collect()
    }

    /// Derived effects for a category at its current level.
    pub fn effects(&self, category: NodeCategory) -> SkillEffects {
        effects::for_level(self.get_level(category))
    }

    /// Saved records, for persistence.
    pub const fn records(&self) -> &BTreeMap<NodeCategory, SkillRecord> {
        &self.records
    }
}

// ---------------------------------------------------------------------------
// Skill Effects
// ---------------------------------------------------------------------------

/// Level-derived modifiers, computed with exact decimals.
pub mod effects {
    use rust_decimal::Decimal;

    use forage_types::SkillEffects;

    /// Per-level harvest XP bonus and time reduction (0.01).
    const PER_LEVEL_XP: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
    /// Cap on XP bonus and time reduction (0.20).
    const MAX_XP: Decimal = Decimal::from_parts(20, 0, 0, false, 2);
    /// Per-level bonus-drop chance bonus (0.005).
    const PER_LEVEL_BONUS_CHANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 3);
    /// Cap on bonus-drop chance bonus (0.10).
    const MAX_BONUS_CHANCE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
    /// Per-level durability reduction (0.0075).
    const PER_LEVEL_DURABILITY: Decimal = Decimal::from_parts(75, 0, 0, false, 4);
    /// Cap on durability reduction (0.15).
    const MAX_DURABILITY: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

    fn capped(level: u32, per_level: Decimal, cap: Decimal) -> Decimal {
        Decimal::from(level)
            .checked_mul(per_level)
            .map_or(cap, |value| value.min(cap))
    }

    /// Fractional XP bonus on harvests: `min(level * 0.01, 0.20)`.
    pub fn xp_bonus(level: u32) -> Decimal {
        capped(level, PER_LEVEL_XP, MAX_XP)
    }

    /// Fractional harvest time reduction: `min(level * 0.01, 0.20)`.
    pub fn time_reduction(level: u32) -> Decimal {
        capped(level, PER_LEVEL_XP, MAX_XP)
    }

    /// Fractional bonus-drop chance bonus: `min(level * 0.005, 0.10)`.
    pub fn bonus_drop_chance(level: u32) -> Decimal {
        capped(level, PER_LEVEL_BONUS_CHANCE, MAX_BONUS_CHANCE)
    }

    /// Fractional tool durability reduction: `min(level * 0.0075, 0.15)`.
    pub fn durability_reduction(level: u32) -> Decimal {
        capped(level, PER_LEVEL_DURABILITY, MAX_DURABILITY)
    }

    /// All effects for a level.
    pub fn for_level(level: u32) -> SkillEffects {
        SkillEffects {
            time_reduction: time_reduction(level),
            bonus_drop_chance: bonus_drop_chance(level),
            durability_reduction: durability_reduction(level),
        }
    }

    #[cfg(test)]
    mod tests {
        use rust_decimal_macros::dec;

        use super::*;

        #[test]
        fn xp_bonus_scales_then_caps() {
            assert_eq!(xp_bonus(1), dec!(0.01));
            assert_eq!(xp_bonus(10), dec!(0.10));
            assert_eq!(xp_bonus(20), dec!(0.20));
            assert_eq!(xp_bonus(25), dec!(0.20));
        }

        #[test]
        fn bonus_drop_chance_caps_at_ten_percent() {
            assert_eq!(bonus_drop_chance(1), dec!(0.005));
            assert_eq!(bonus_drop_chance(19), dec!(0.095));
            assert_eq!(bonus_drop_chance(20), dec!(0.10));
        }

        #[test]
        fn durability_reduction_caps_at_fifteen_percent() {
            assert_eq!(durability_reduction(4), dec!(0.03));
            assert_eq!(durability_reduction(20), dec!(0.15));
        }

        #[test]
        fn for_level_bundles_all_three() {
            let effects = for_level(10);
            assert_eq!(effects.time_reduction, dec!(0.10));
            assert_eq!(effects.bonus_drop_chance, dec!(0.05));
            assert_eq!(effects.durability_reduction, dec!(0.075));
        }
    }
}
