//! The node catalog: one immutable definition per kind of harvestable.
//!
//! A catalog is assembled once at startup through [`NodeCatalogBuilder`],
//! which validates every definition, and then frozen into a [`NodeCatalog`].
//! The frozen catalog has no mutating methods; share it by reference or
//! `Arc` with every consumer.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use forage_types::{DropEntry, HOURS_PER_DAY, NodeDefinition, NodeId, RespawnPolicy};

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects and validates node definitions before the catalog is frozen.
#[derive(Debug, Default)]
pub struct NodeCatalogBuilder {
    nodes: BTreeMap<NodeId, NodeDefinition>,
}

impl NodeCatalogBuilder {
    /// Create an empty builder.
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Register a node definition.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateNode`] if the id is already defined, or
    /// [`WorldError::InvalidDefinition`] if a drop row has `min_qty > max_qty`,
    /// a chance outside 0--100, or a daily reset hour outside 0--23.
    pub fn define(&mut self, definition: NodeDefinition) -> Result<&mut Self, WorldError> {
        validate(&definition)?;
        if self.nodes.contains_key(&definition.node_id) {
            return Err(WorldError::DuplicateNode(definition.node_id));
        }
        self.nodes.insert(definition.node_id.clone(), definition);
        Ok(self)
    }

    /// Freeze the catalog.
    pub fn build(self) -> NodeCatalog {
        NodeCatalog { nodes: self.nodes }
    }
}

fn validate(definition: &NodeDefinition) -> Result<(), WorldError> {
    let invalid = |reason: String| WorldError::InvalidDefinition {
        node: definition.node_id.clone(),
        reason,
    };

    if let RespawnPolicy::Daily { reset_hour } = definition.respawn {
        if u64::from(reset_hour) >= HOURS_PER_DAY {
            return Err(invalid(format!("reset hour {reset_hour} is not a valid hour")));
        }
    }

    for entry in definition.base_drops.iter().chain(&definition.bonus_drops) {
        validate_entry(entry).map_err(invalid)?;
    }
    Ok(())
}

fn validate_entry(entry: &DropEntry) -> Result<(), String> {
    if entry.min_qty > entry.max_qty {
        return Err(format!(
            "drop {} has min_qty {} above max_qty {}",
            entry.item_id, entry.min_qty, entry.max_qty
        ));
    }
    if entry.chance_percent < Decimal::ZERO || entry.chance_percent > Decimal::ONE_HUNDRED {
        return Err(format!(
            "drop {} has chance {} outside 0-100",
            entry.item_id, entry.chance_percent
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Frozen catalog
// ---------------------------------------------------------------------------

/// Read-only registry of node definitions.
#[derive(Debug, Clone, Default)]
pub struct NodeCatalog {
    nodes: BTreeMap<NodeId, NodeDefinition>,
}

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    nodes: Vec<NodeDefinition>,
}

impl NodeCatalog {
    /// Start building a catalog.
    pub const fn builder() -> NodeCatalogBuilder {
        NodeCatalogBuilder::new()
    }

    /// Build a catalog from a YAML document with a top-level `nodes` list.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CatalogParse`] for malformed YAML and the
    /// [`NodeCatalogBuilder::define`] errors for invalid definitions.
    pub fn from_yaml(yaml: &str) -> Result<Self, WorldError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        let mut builder = NodeCatalogBuilder::new();
        for definition in file.nodes {
            builder.define(definition)?;
        }
        Ok(builder.build())
    }

    /// Look up a node definition.
    pub fn get(&self, node_id: &NodeId) -> Option<&NodeDefinition> {
        self.nodes.get(node_id)
    }

    /// Look up a node definition, failing with [`WorldError::NodeNotFound`].
    ///
    /// A miss means the world object is not harvestable, not that the
    /// engine is broken.
    pub fn require(&self, node_id: &NodeId) -> Result<&NodeDefinition, WorldError> {
        self.nodes
            .get(node_id)
            .ok_or_else(|| WorldError::NodeNotFound(node_id.clone()))
    }

    /// Whether a node id is registered.
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Iterate definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.nodes.values()
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use forage_types::{NodeCategory, ToolType};
    use rust_decimal_macros::dec;

    use super::*;

    fn stone() -> NodeDefinition {
        NodeDefinition {
            node_id: NodeId::from("node_rock_stone"),
            display_name: "돌멩이".to_owned(),
            category: NodeCategory::Mineral,
            required_tool: ToolType::Hand,
            respawn: RespawnPolicy::Time { minutes: 60 },
            xp_reward: 5,
            base_drops: vec![DropEntry::guaranteed("돌", 2, 4)],
            bonus_drops: Vec::new(),
            has_bonus_round: false,
        }
    }

    #[test]
    fn define_and_get() {
        let mut builder = NodeCatalog::builder();
        assert!(builder.define(stone()).is_ok());
        let catalog = builder.build();

        assert_eq!(catalog.len(), 1);
        let id = NodeId::from("node_rock_stone");
        assert!(catalog.contains(&id));
        assert_eq!(catalog.get(&id).map(|d| d.xp_reward), Some(5));
    }

    #[test]
    fn unknown_node_is_not_found() {
        let catalog = NodeCatalog::default();
        let result = catalog.require(&NodeId::from("node_nothing"));
        assert!(matches!(result, Err(WorldError::NodeNotFound(_))));
        assert!(catalog.get(&NodeId::from("node_nothing")).is_none());
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut builder = NodeCatalog::builder();
        assert!(builder.define(stone()).is_ok());
        let result = builder.define(stone());
        assert!(matches!(result, Err(WorldError::DuplicateNode(_))));
    }

    #[test]
    fn inverted_quantity_range_rejected() {
        let mut def = stone();
        def.base_drops = vec![DropEntry::guaranteed("돌", 5, 2)];
        let result = NodeCatalog::builder().define(def).map(|_| ());
        assert!(matches!(result, Err(WorldError::InvalidDefinition { .. })));
    }

    #[test]
    fn chance_above_hundred_rejected() {
        let mut def = stone();
        def.bonus_drops = vec![DropEntry::with_chance("석탄", 1, 1, dec!(100.5))];
        let result = NodeCatalog::builder().define(def).map(|_| ());
        assert!(matches!(result, Err(WorldError::InvalidDefinition { .. })));
    }

    #[test]
    fn bad_reset_hour_rejected() {
        let mut def = stone();
        def.respawn = RespawnPolicy::Daily { reset_hour: 24 };
        let result = NodeCatalog::builder().define(def).map(|_| ());
        assert!(matches!(result, Err(WorldError::InvalidDefinition { .. })));
    }

    #[test]
    fn from_yaml_loads_nodes() {
        let yaml = r"
nodes:
  - node_id: node_bush_berry
    display_name: 산딸기 덤불
    category: plant
    required_tool: hand
    respawn:
      kind: daily
      reset_hour: 6
    xp_reward: 4
    base_drops:
      - item_id: 산딸기
        min_qty: 1
        max_qty: 3
    bonus_drops:
      - item_id: 꿀
        min_qty: 1
        max_qty: 1
        chance_percent: 5
        conditions:
          requires_first_daily_harvest: true
";
        let catalog = NodeCatalog::from_yaml(yaml);
        assert!(catalog.is_ok(), "{catalog:?}");
        let catalog = catalog.unwrap_or_default();
        let def = catalog.get(&NodeId::from("node_bush_berry"));
        assert_eq!(
            def.map(|d| d.respawn),
            Some(RespawnPolicy::Daily { reset_hour: 6 })
        );
        let honey = def.and_then(|d| d.bonus_drops.first());
        assert_eq!(honey.map(|e| e.chance_percent), Some(dec!(5)));
        assert!(honey.and_then(|e| e.conditions.as_ref()).is_some_and(|c| c.requires_first_daily_harvest));
    }

    #[test]
    fn from_yaml_rejects_garbage() {
        let result = NodeCatalog::from_yaml("nodes: [1, 2");
        assert!(matches!(result, Err(WorldError::CatalogParse { .. })));
    }
}
