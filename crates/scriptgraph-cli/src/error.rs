//! Error handling for the scriptgraph CLI.
//!
//! Commands return [`CliError`]. Library errors convert into it through
//! `#[from]`, and `main` renders it with miette via
//! [`cli_error_to_miette`].

mod miette;

use std::path::PathBuf;

use scriptgraph::ResourceId;
use scriptgraph_config::ConfigError;
use scriptgraph_service::ServiceError;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    /// Descriptor or settings loading failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registration or script assembly failed.
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// An input failed while being registered.
    #[error("{}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: Box<CliError>,
    },

    /// Neither a descriptor file nor a directory holding one.
    #[error("No descriptor found at {}", .0.display())]
    DescriptorNotFound(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No resource or load group registered as {0}")]
    NotRegistered(ResourceId),

    /// `check` found at least one invalid input.
    #[error("{failed} of {total} input(s) failed to register")]
    CheckFailed { failed: usize, total: usize },

    /// `check --strict` found dependencies on unregistered ids.
    #[error("{0} dependency id(s) are not registered")]
    Unresolved(usize),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

impl CliError {
    /// Attach the input an error came from.
    pub fn for_input(self, path: impl Into<PathBuf>) -> Self {
        CliError::Input {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The error with any input wrappers removed.
    pub fn root(&self) -> &CliError {
        match self {
            CliError::Input { source, .. } => source.root(),
            other => other,
        }
    }
}
