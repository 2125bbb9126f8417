//! Item rarity flags.
//!
//! A golden item is a rarity-flagged variant whose rolled quantity is always
//! doubled when it drops. The table is owned by the item side of the game
//! and only read here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use forage_types::ItemId;

/// Set of item ids flagged as golden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityTable {
    golden: BTreeSet<ItemId>,
}

impl RarityTable {
    /// Create an empty table (nothing is golden).
    pub const fn new() -> Self {
        Self {
            golden: BTreeSet::new(),
        }
    }

    /// Flag an item as golden.
    pub fn mark_golden(&mut self, item: impl Into<ItemId>) {
        self.golden.insert(item.into());
    }

    /// Whether an item is golden.
    pub fn is_golden(&self, item: &ItemId) -> bool {
        self.golden.contains(item)
    }

    /// Number of golden items.
    pub fn golden_count(&self) -> usize {
        self.golden.len()
    }
}

impl<I: Into<ItemId>> FromIterator<I> for RarityTable {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            golden: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_marked_items_are_golden() {
        let table: RarityTable = ["황금 조개", "황금 도토리"].into_iter().collect();
        assert!(table.is_golden(&ItemId::from("황금 조개")));
        assert!(!table.is_golden(&ItemId::from("조개껍데기")));
        assert_eq!(table.golden_count(), 2);
    }

    #[test]
    fn mark_golden_is_idempotent() {
        let mut table = RarityTable::new();
        table.mark_golden("황금 별");
        table.mark_golden("황금 별");
        assert_eq!(table.golden_count(), 1);
    }
}
