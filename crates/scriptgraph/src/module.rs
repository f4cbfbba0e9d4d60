use serde::{Deserialize, Serialize};

/// One piece of a local module: a path inside the deployment, or inline text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleContent {
    Path(String),
    Inline(String),
}

/// Where the code of a module comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ModuleSource {
    /// Files (or inline snippets) served from the owning deployment.
    Local {
        contents: Vec<ModuleContent>,
        #[serde(default)]
        resource_bundle: Option<String>,
    },
    /// An external URL; the resource is never served by us.
    Remote { uri: String },
}

/// A contribution of code to a script resource, attributed to the context
/// path that registered it.
///
/// A resource may collect modules from several contexts; unregistering a
/// context removes only its own modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Module {
    pub context_path: String,
    pub source: ModuleSource,
    pub priority: i32,
}

impl Module {
    pub fn new(context_path: impl Into<String>, source: ModuleSource, priority: i32) -> Self {
        Self {
            context_path: context_path.into(),
            source,
            priority,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, ModuleSource::Remote { .. })
    }

    /// URI of a remote module.
    pub fn remote_uri(&self) -> Option<&str> {
        match &self.source {
            ModuleSource::Remote { uri } => Some(uri),
            ModuleSource::Local { .. } => None,
        }
    }

    pub fn resource_bundle(&self) -> Option<&str> {
        match &self.source {
            ModuleSource::Local {
                resource_bundle, ..
            } => resource_bundle.as_deref(),
            ModuleSource::Remote { .. } => None,
        }
    }
}
