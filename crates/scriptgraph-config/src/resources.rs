//! What one context registers: descriptors, static scripts and path mappings.

use indexmap::IndexMap;
use scriptgraph::ScriptResourceDescriptor;
use serde::Serialize;

use crate::error::{ConfigError, Result};

/// A script served as a plain file, outside the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticScriptResource {
    context_path: String,
    directory: Option<String>,
    resource_path: String,
}

impl StaticScriptResource {
    /// Every path must start with `/` and, unless it is `/` itself, must not
    /// end with one.
    pub fn new(context_path: &str, directory: Option<&str>, resource_path: &str) -> Result<Self> {
        validate("contextPath", context_path)?;
        if let Some(directory) = directory {
            validate("directory", directory)?;
        }
        validate("resourcePath", resource_path)?;
        Ok(Self {
            context_path: context_path.to_string(),
            directory: directory.map(str::to_string),
            resource_path: resource_path.to_string(),
        })
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    /// Path the script is requested under; the key among static resources.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Location inside the context: the directory joined with the resource path.
    pub fn directory_and_path(&self) -> String {
        match &self.directory {
            Some(directory) => format!("{directory}{}", self.resource_path),
            None => self.resource_path.clone(),
        }
    }
}

fn validate(name: &'static str, path: &str) -> Result<()> {
    let reason = if path.is_empty() {
        "cannot be empty"
    } else if !path.starts_with('/') {
        "must start with '/'"
    } else if path.len() >= 2 && path.ends_with('/') {
        "cannot end with '/'"
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidPath {
        name,
        path: path.to_string(),
        reason,
    })
}

/// Everything a single context registers with, and later unregisters from,
/// the script service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScriptResources {
    pub context_path: String,
    pub descriptors: Vec<ScriptResourceDescriptor>,
    pub static_resources: Vec<StaticScriptResource>,
    /// require.js path prefixes mapped to their target paths.
    pub paths: IndexMap<String, Vec<String>>,
}

impl ScriptResources {
    pub fn new(context_path: impl Into<String>) -> Self {
        Self {
            context_path: context_path.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty() && self.static_resources.is_empty() && self.paths.is_empty()
    }
}
