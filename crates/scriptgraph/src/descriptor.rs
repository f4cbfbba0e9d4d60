//! Descriptors: the input format of [`ScriptGraph::add`] and [`ScriptGraph::remove`].
//!
//! Descriptors are plain data produced by configuration loading. They are
//! cheap to clone and carry no validation of their own; every structural
//! check happens when a batch is added to a graph.
//!
//! [`ScriptGraph::add`]: crate::ScriptGraph::add
//! [`ScriptGraph::remove`]: crate::ScriptGraph::remove

use serde::{Deserialize, Serialize};

use crate::module::{Module, ModuleSource};
use crate::{FetchMode, ResourceId};

/// A dependency edge declared by a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyDescriptor {
    pub id: ResourceId,
    /// Parameter name the dependency is bound to in the AMD factory.
    #[serde(default)]
    pub alias: Option<String>,
    /// Loader plugin resource, appended to the module name as `id!resource`.
    #[serde(default)]
    pub plugin_resource: Option<String>,
}

impl DependencyDescriptor {
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            alias: None,
            plugin_resource: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_plugin_resource(mut self, resource: impl Into<String>) -> Self {
        self.plugin_resource = Some(resource.into());
        self
    }
}

/// A module declared for a resource. When `context_path` is `None` the
/// module belongs to the context of the batch it is added with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    #[serde(default)]
    pub context_path: Option<String>,
    pub source: ModuleSource,
    #[serde(default)]
    pub priority: i32,
}

impl ModuleDescriptor {
    pub fn new(source: ModuleSource) -> Self {
        Self {
            context_path: None,
            source,
            priority: 0,
        }
    }

    pub fn local_path(path: impl Into<String>) -> Self {
        Self::new(ModuleSource::Local {
            contents: vec![crate::ModuleContent::Path(path.into())],
            resource_bundle: None,
        })
    }

    pub fn remote(uri: impl Into<String>) -> Self {
        Self::new(ModuleSource::Remote { uri: uri.into() })
    }

    pub fn in_context(mut self, context_path: impl Into<String>) -> Self {
        self.context_path = Some(context_path.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub(crate) fn to_module(&self, batch_context: &str) -> Module {
        let context = self.context_path.as_deref().unwrap_or(batch_context);
        Module::new(context, self.source.clone(), self.priority)
    }
}

/// Declaration of one script resource.
///
/// # Example
///
/// ```rust
/// use scriptgraph::{FetchMode, ResourceId, ScriptResourceDescriptor};
///
/// let desc = ScriptResourceDescriptor::on_load(ResourceId::shared("app"))
///     .depends_on(ResourceId::shared("jquery"))
///     .in_group("core");
///
/// assert_eq!(desc.fetch_mode, FetchMode::OnLoad);
/// assert_eq!(desc.dependencies.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptResourceDescriptor {
    pub id: ResourceId,
    pub fetch_mode: FetchMode,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub native_amd: bool,
    #[serde(default)]
    pub dependencies: Vec<DependencyDescriptor>,
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,
    #[serde(default)]
    pub supported_locales: Vec<String>,
}

impl ScriptResourceDescriptor {
    pub fn new(id: ResourceId, fetch_mode: FetchMode) -> Self {
        Self {
            id,
            fetch_mode,
            alias: None,
            group: None,
            native_amd: false,
            dependencies: Vec::new(),
            modules: Vec::new(),
            supported_locales: Vec::new(),
        }
    }

    pub fn immediate(id: ResourceId) -> Self {
        Self::new(id, FetchMode::Immediate)
    }

    pub fn on_load(id: ResourceId) -> Self {
        Self::new(id, FetchMode::OnLoad)
    }

    /// Add a plain dependency edge (no alias, no plugin resource).
    pub fn depends_on(self, id: ResourceId) -> Self {
        self.with_dependency(DependencyDescriptor::new(id))
    }

    pub fn with_dependency(mut self, dependency: DependencyDescriptor) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn native_amd(mut self, native_amd: bool) -> Self {
        self.native_amd = native_amd;
        self
    }

    pub fn module(mut self, module: ModuleDescriptor) -> Self {
        self.modules.push(module);
        self
    }

    pub fn supported_locale(mut self, locale: impl Into<String>) -> Self {
        self.supported_locales.push(locale.into());
        self
    }
}
