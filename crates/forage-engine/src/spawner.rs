//! Places harvestable instances in the session world.
//!
//! At session start the spawner puts a fixed number of instances of every
//! catalog node kind into the world. When an instance is depleted the host
//! removes the world object and spawns a replacement with a fresh instance
//! id; depletion itself is never undone.

use forage_types::{InstanceId, NodeId, ToolType};
use forage_world::NodeCatalog;
use tracing::{debug, info};

/// One placed world object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Id minted for the object when it spawned.
    pub instance_id: InstanceId,
    /// Catalog kind.
    pub node_id: NodeId,
    /// Tool the kind requires.
    pub required_tool: ToolType,
}

impl Placement {
    /// Spawn a new object of the same kind.
    pub fn respawned(&self) -> Self {
        Self {
            instance_id: InstanceId::new(),
            node_id: self.node_id.clone(),
            required_tool: self.required_tool,
        }
    }
}

/// Place `per_node` instances of every kind in the catalog.
pub fn spawn_instances(catalog: &NodeCatalog, per_node: u32) -> Vec<Placement> {
    let placements: Vec<Placement> = catalog
        .iter()
        .flat_map(|definition| {
            (0..per_node).map(|_| Placement {
                instance_id: InstanceId::new(),
                node_id: definition.node_id.clone(),
                required_tool: definition.required_tool,
            })
        })
        .collect();

    for placement in &placements {
        debug!(
            instance = %placement.instance_id,
            node = %placement.node_id,
            "Instance placed"
        );
    }
    info!(
        kinds = catalog.len(),
        instances = placements.len(),
        "World populated"
    );
    placements
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use forage_world::create_starting_catalog;

    use super::*;

    #[test]
    fn every_kind_gets_its_instances() {
        let (catalog, _) = create_starting_catalog().unwrap_or_default();
        let placements = spawn_instances(&catalog, 3);
        assert_eq!(placements.len(), catalog.len().saturating_mul(3));
        let kinds: BTreeSet<&NodeId> = placements.iter().map(|p| &p.node_id).collect();
        assert_eq!(kinds.len(), catalog.len());
    }

    #[test]
    fn instance_ids_are_unique() {
        let (catalog, _) = create_starting_catalog().unwrap_or_default();
        let placements = spawn_instances(&catalog, 2);
        let ids: BTreeSet<InstanceId> = placements.iter().map(|p| p.instance_id).collect();
        assert_eq!(ids.len(), placements.len());
    }

    #[test]
    fn respawn_keeps_kind_with_new_id() {
        let (catalog, _) = create_starting_catalog().unwrap_or_default();
        let placements = spawn_instances(&catalog, 1);
        let original = placements.first().cloned();
        let replacement = original.as_ref().map(Placement::respawned);
        assert_eq!(
            original.as_ref().map(|p| &p.node_id),
            replacement.as_ref().map(|p| &p.node_id)
        );
        assert_ne!(
            original.map(|p| p.instance_id),
            replacement.map(|p| p.instance_id)
        );
    }
}
