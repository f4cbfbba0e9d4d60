//! Errors of the script service.

use scriptgraph::GraphError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A path prefix is already mapped to other targets.
    #[error(
        "cannot accept path mapping '{prefix}' from context '{context_path}': already registered by {owners:?} with target {existing:?}"
    )]
    DuplicatePathMapping {
        prefix: String,
        context_path: String,
        owners: Vec<String>,
        existing: Vec<String>,
    },

    /// A static script path is already served by another context.
    #[error("static script '{resource_path}' is already provided by context '{owner}'")]
    DuplicateStaticResource { resource_path: String, owner: String },

    #[error("failed to read script '{path}' of context '{context_path}': {source}")]
    Read {
        context_path: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    /// `true` for every kind of "already registered" conflict.
    pub fn is_duplicate(&self) -> bool {
        match self {
            ServiceError::Graph(err) => err.is_duplicate(),
            ServiceError::DuplicatePathMapping { .. } | ServiceError::DuplicateStaticResource { .. } => true,
            ServiceError::Read { .. } => false,
        }
    }
}
