//! Shared type definitions for the Forage gathering engine.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types defined here flow to `TypeScript` via `ts-rs` so the
//! game UI can render gather results and rejection messages without
//! duplicating the schema.
//!
//! # Modules
//!
//! - [`ids`] -- Instance UUIDs and authored node/item keys
//! - [`enums`] -- Categories, tools, seasons, weather, rejection reasons
//! - [`structs`] -- Node definitions, drop entries, harvest state, context, results
//! - [`time`] -- In-game minute clock values

pub mod enums;
pub mod ids;
pub mod structs;
pub mod time;

// Re-export all public types at crate root for convenience.
pub use enums::{HarvestPhase, NodeCategory, RejectionReason, Season, ToolType, Weather};
pub use ids::{InstanceId, ItemId, NodeId};
pub use structs::{
    BASE_SKILL_LEVEL, DropConditions, DropEntry, EnvironmentSnapshot, GatherContext,
    GatherRequest, GatherResult, HarvestState, ItemGrant, MAX_HARVESTS, NodeDefinition,
    RespawnPolicy, SkillEffects, SkillRecord,
};
pub use time::{GameTime, HOURS_PER_DAY, MINUTES_PER_DAY, MINUTES_PER_HOUR};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the UI-facing types.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings when types with #[ts(export)] are exported.
        // The files land in `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::InstanceId::export_all();
        let _ = crate::ids::NodeId::export_all();
        let _ = crate::ids::ItemId::export_all();

        // Enums
        let _ = crate::enums::NodeCategory::export_all();
        let _ = crate::enums::ToolType::export_all();
        let _ = crate::enums::Season::export_all();
        let _ = crate::enums::Weather::export_all();
        let _ = crate::enums::RejectionReason::export_all();
        let _ = crate::enums::HarvestPhase::export_all();

        // Time
        let _ = crate::time::GameTime::export_all();

        // Structs
        let _ = crate::structs::RespawnPolicy::export_all();
        let _ = crate::structs::DropConditions::export_all();
        let _ = crate::structs::DropEntry::export_all();
        let _ = crate::structs::NodeDefinition::export_all();
        let _ = crate::structs::HarvestState::export_all();
        let _ = crate::structs::SkillRecord::export_all();
        let _ = crate::structs::EnvironmentSnapshot::export_all();
        let _ = crate::structs::GatherContext::export_all();
        let _ = crate::structs::GatherRequest::export_all();
        let _ = crate::structs::ItemGrant::export_all();
        let _ = crate::structs::SkillEffects::export_all();
        let _ = crate::structs::GatherResult::export_all();
    }
}
