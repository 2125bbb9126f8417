//! Error types for the `forage-world` crate.
//!
//! All fallible operations in this crate return `Result<_, WorldError>`.

use forage_types::{InstanceId, NodeId};

/// Errors that can occur while building the catalog or tracking harvests.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The node id is not registered in the catalog.
    #[error("node not found in catalog: {0}")]
    NodeNotFound(NodeId),

    /// A node id was defined twice while building the catalog.
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// A node definition failed validation.
    #[error("invalid definition for {node}: {reason}")]
    InvalidDefinition {
        /// The offending node.
        node: NodeId,
        /// What is wrong with it.
        reason: String,
    },

    /// A harvest was recorded against an instance that is already depleted.
    #[error("instance {0} is depleted")]
    InstanceDepleted(InstanceId),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,

    /// A catalog file could not be parsed.
    #[error("failed to parse catalog YAML: {source}")]
    CatalogParse {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },
}
