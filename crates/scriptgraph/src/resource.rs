//! Script resources: the frozen nodes of a [`ScriptGraph`](crate::ScriptGraph)
//! and the builder that stages them during an `add` transaction.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;

use crate::module::Module;
use crate::{FetchMode, GraphError, ResourceId, Result};

/// Valid JavaScript identifier, used to check AMD parameter aliases.
pub static JS_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").expect("identifier pattern is valid")
});

/// Per-edge metadata of a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyInfo {
    pub alias: Option<String>,
    pub plugin_resource: Option<String>,
}

/// A script resource as published in a graph snapshot.
///
/// Instances are immutable and shared through `Arc`. Equality and hashing
/// are by id only.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptResource {
    id: ResourceId,
    fetch_mode: FetchMode,
    alias: String,
    group: Option<ResourceId>,
    native_amd: bool,
    modules: Vec<Module>,
    dependencies: IndexMap<ResourceId, IndexSet<DependencyInfo>>,
    #[serde(serialize_with = "serialize_sorted")]
    closure: HashSet<ResourceId>,
    contexts: IndexSet<String>,
    supported_locales: IndexSet<String>,
}

fn serialize_sorted<S>(closure: &HashSet<ResourceId>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let mut ids: Vec<&ResourceId> = closure.iter().collect();
    ids.sort();
    ids.serialize(serializer)
}

impl ScriptResource {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }

    /// The declared alias, or the last segment of the resource name.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Id of the load group this resource is delivered with, if any.
    pub fn group(&self) -> Option<&ResourceId> {
        self.group.as_ref()
    }

    /// `true` for resources that already are AMD modules and must not be wrapped.
    pub fn is_native_amd(&self) -> bool {
        self.native_amd
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// `true` when no module is left.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Ids of the direct dependencies, in declaration order.
    pub fn dependencies(&self) -> impl Iterator<Item = &ResourceId> {
        self.dependencies.keys()
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn depends_on(&self, id: &ResourceId) -> bool {
        self.dependencies.contains_key(id)
    }

    pub fn dependency_info(&self, id: &ResourceId) -> Option<&IndexSet<DependencyInfo>> {
        self.dependencies.get(id)
    }

    /// Every id reachable through dependency edges. Never contains [`Self::id`].
    pub fn closure(&self) -> &HashSet<ResourceId> {
        &self.closure
    }

    /// Context paths that contributed to this resource.
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.contexts.iter().map(String::as_str)
    }

    pub fn supported_locales(&self) -> impl Iterator<Item = &str> {
        self.supported_locales.iter().map(String::as_str)
    }

    pub fn supports_locale(&self, locale: &str) -> bool {
        self.supported_locales.contains(locale)
    }

    /// Closure-based partial order.
    ///
    /// `Greater` when `other` is a (transitive) dependency of `self`, `Less`
    /// when `self` is one of `other`, `Equal` when they are unrelated. This
    /// is not a total order and must not be used to sort or key collections.
    pub fn compare_closure(&self, other: &ScriptResource) -> Ordering {
        if self.closure.contains(&other.id) {
            Ordering::Greater
        } else if other.closure.contains(&self.id) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    pub(crate) fn to_builder(self: &Arc<Self>) -> ResourceBuilder {
        ResourceBuilder {
            id: self.id.clone(),
            fetch_mode: self.fetch_mode,
            alias: Some(self.alias.clone()),
            group: self.group.clone(),
            native_amd: self.native_amd,
            modules: self.modules.clone(),
            dependencies: self.dependencies.clone(),
            closure: HashSet::default(),
            contexts: self.contexts.clone(),
            supported_locales: self.supported_locales.clone(),
            origin: Some(Arc::clone(self)),
            touched: false,
        }
    }
}

impl PartialEq for ScriptResource {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScriptResource {}

impl Hash for ScriptResource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Mutable staging copy of a resource, local to one graph transaction.
#[derive(Debug, Clone)]
pub(crate) struct ResourceBuilder {
    pub(crate) id: ResourceId,
    pub(crate) fetch_mode: FetchMode,
    alias: Option<String>,
    pub(crate) group: Option<ResourceId>,
    native_amd: bool,
    modules: Vec<Module>,
    dependencies: IndexMap<ResourceId, IndexSet<DependencyInfo>>,
    pub(crate) closure: HashSet<ResourceId>,
    contexts: IndexSet<String>,
    supported_locales: IndexSet<String>,
    /// Published resource this builder was copied from.
    origin: Option<Arc<ScriptResource>>,
    touched: bool,
}

impl ResourceBuilder {
    pub(crate) fn new(
        id: ResourceId,
        fetch_mode: FetchMode,
        alias: Option<String>,
        group: Option<ResourceId>,
        native_amd: bool,
        context_path: &str,
    ) -> Self {
        let mut contexts = IndexSet::new();
        contexts.insert(context_path.to_string());
        Self {
            id,
            fetch_mode,
            alias,
            group,
            native_amd,
            modules: Vec::new(),
            dependencies: IndexMap::new(),
            closure: HashSet::default(),
            contexts,
            supported_locales: IndexSet::new(),
            origin: None,
            touched: true,
        }
    }

    pub(crate) fn add_module(&mut self, module: Module) {
        self.contexts.insert(module.context_path.clone());
        self.modules.push(module);
        self.touched = true;
    }

    pub(crate) fn add_supported_locale(&mut self, locale: &str) {
        if self.supported_locales.insert(locale.to_string()) {
            self.touched = true;
        }
    }

    /// Merge `closure` of the resource `updated` into ours if we reach it.
    pub(crate) fn closure_updated(&mut self, updated: &ResourceId, closure: &HashSet<ResourceId>) {
        if self.closure.contains(updated) {
            self.closure.extend(closure.iter().cloned());
        }
    }

    pub(crate) fn dependency_ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.dependencies.keys()
    }

    pub(crate) fn record_dependency(&mut self, target: ResourceId, info: DependencyInfo) {
        self.dependencies.entry(target).or_default().insert(info);
        self.touched = true;
    }

    /// Fails if `dependent` (with mode `mode`) may not depend on us.
    pub(crate) fn check_dependent_fetch_mode(&self, dependent: &ResourceId, mode: FetchMode) -> Result<()> {
        if self.fetch_mode != mode {
            return Err(GraphError::InvalidResource(format!(
                "ScriptResource {dependent} with fetchMode '{mode}' cannot depend on '{}' with fetchMode '{}'. The fetchModes must be equal.",
                self.id, self.fetch_mode
            )));
        }
        Ok(())
    }

    /// Fails if we already depend on `dependency`, newly declared with mode `mode`.
    pub(crate) fn check_dependency_fetch_mode(&self, dependency: &ResourceId, mode: FetchMode) -> Result<()> {
        if self.dependencies.contains_key(dependency) && self.fetch_mode != mode {
            return Err(GraphError::InvalidResource(format!(
                "ScriptResource {} with fetchMode '{}' cannot depend on '{dependency}' with fetchMode '{mode}'. The fetchModes must be equal.",
                self.id, self.fetch_mode
            )));
        }
        Ok(())
    }

    /// Drop the modules and the attribution of `context_path`.
    pub(crate) fn remove_context(&mut self, context_path: &str) {
        let before = self.modules.len();
        self.modules.retain(|m| m.context_path != context_path);
        let removed_context = self.contexts.shift_remove(context_path);
        if removed_context || self.modules.len() != before {
            self.touched = true;
        }
    }

    /// `true` when no module is left.
    pub(crate) fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn build(self) -> Arc<ScriptResource> {
        if let (false, Some(origin)) = (self.touched, &self.origin) {
            if origin.closure == self.closure {
                return Arc::clone(origin);
            }
        }

        let alias = self
            .alias
            .unwrap_or_else(|| self.id.last_segment().to_string());
        if self.fetch_mode == FetchMode::OnLoad && !JS_IDENTIFIER.is_match(&alias) {
            tracing::warn!("alias {} is not valid JS identifier", alias);
        }

        Arc::new(ScriptResource {
            id: self.id,
            fetch_mode: self.fetch_mode,
            alias,
            group: self.group,
            native_amd: self.native_amd,
            modules: self.modules,
            dependencies: self.dependencies,
            closure: self.closure,
            contexts: self.contexts,
            supported_locales: self.supported_locales,
        })
    }
}
