//! Error types for descriptor and settings loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported descriptor format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    /// A context, directory or resource path that is not of the form `/a/b`.
    #[error("{name} {reason}; actual: '{path}'")]
    InvalidPath {
        name: &'static str,
        path: String,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, hint: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }
}
