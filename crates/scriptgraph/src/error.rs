//! Error types for graph operations.

use thiserror::Error;

use crate::ResourceId;

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Reasons a batch of descriptors is rejected by [`ScriptGraph::add`].
///
/// Both variants are raised before anything is published: the graph the
/// batch was applied to stays exactly as it was.
///
/// [`ScriptGraph::add`]: crate::ScriptGraph::add
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A dependency cycle, or an edge joining resources with different fetch modes.
    #[error("invalid resource: {0}")]
    InvalidResource(String),

    /// The resource id is already registered (by any context).
    #[error("duplicate resource key: {0}")]
    DuplicateResourceKey(ResourceId),
}

impl GraphError {
    pub fn is_invalid_resource(&self) -> bool {
        matches!(self, GraphError::InvalidResource(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, GraphError::DuplicateResourceKey(_))
    }
}
