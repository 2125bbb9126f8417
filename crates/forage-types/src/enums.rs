//! Enumeration types shared across the gathering engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Node categories
// ---------------------------------------------------------------------------

/// The family a harvestable belongs to. Each category has its own skill
/// track in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NodeCategory {
    /// Bushes, flowers, herbs, mushroom patches.
    Plant,
    /// Trees, stumps, fallen logs.
    Wood,
    /// Rocks, ore veins, geodes.
    Mineral,
    /// Shells, driftwood, tide pools.
    Beach,
    /// Event and one-off harvestables.
    Special,
}

impl NodeCategory {
    /// Every category, in ledger order.
    pub const ALL: [Self; 5] = [
        Self::Plant,
        Self::Wood,
        Self::Mineral,
        Self::Beach,
        Self::Special,
    ];

    /// Stable lowercase name, matching the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plant => "plant",
            Self::Wood => "wood",
            Self::Mineral => "mineral",
            Self::Beach => "beach",
            Self::Special => "special",
        }
    }
}

impl core::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// The tool a node requires. Matching is exact: there is no fallback tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ToolType {
    /// Bare hands.
    Hand,
    /// Felling and chopping.
    Axe,
    /// Breaking rock.
    Pickaxe,
    /// Digging.
    Shovel,
    /// Watering plants.
    WateringCan,
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// A season in the in-game year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// First season of the year.
    Spring,
    /// Second season.
    Summer,
    /// Third season.
    Autumn,
    /// Fourth season.
    Winter,
}

impl Season {
    /// The annual cycle, starting from spring.
    pub const CYCLE: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];
}

/// Current weather conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// Clear skies.
    Sunny,
    /// Overcast.
    Cloudy,
    /// Rain; some mushrooms only appear now.
    Rainy,
    /// Heavy storm.
    Stormy,
    /// Snowfall.
    Snowy,
}

// ---------------------------------------------------------------------------
// Gathering outcomes
// ---------------------------------------------------------------------------

/// Why a gather request was turned away. Serializable so the UI can pick
/// the right message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RejectionReason {
    /// The node id is not in the catalog.
    UnknownNode,
    /// The instance is on cooldown or depleted.
    NotAvailable,
    /// The supplied tool does not match the node's required tool.
    WrongTool,
}

/// Lifecycle phase of a single harvest instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HarvestPhase {
    /// Never harvested.
    Fresh,
    /// Harvested at least once and ready again.
    Available,
    /// Waiting for its respawn window or daily reset.
    OnCooldown,
    /// Harvested the maximum number of times. Terminal.
    Depleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&NodeCategory::Mineral).ok();
        assert_eq!(json.as_deref(), Some("\"mineral\""));
        let tool = serde_json::to_string(&ToolType::WateringCan).ok();
        assert_eq!(tool.as_deref(), Some("\"watering_can\""));
    }

    #[test]
    fn category_as_str_matches_serde() {
        for category in NodeCategory::ALL {
            let json = serde_json::to_string(&category).ok();
            assert_eq!(json, Some(format!("\"{}\"", category.as_str())));
        }
    }
}
