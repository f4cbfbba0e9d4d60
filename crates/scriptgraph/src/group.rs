//! Load groups: resources concatenated and served under one URL.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexSet;
use serde::Serialize;

use crate::ResourceId;

/// A named bundle of resources sharing one delivery URL.
///
/// Members keep their own identity in the graph; the group only records
/// which ids are concatenated together. Equality is by id.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptGroup {
    id: ResourceId,
    context_path: String,
    scripts: IndexSet<ResourceId>,
    supported_locales: IndexSet<String>,
}

impl ScriptGroup {
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Context path of the batch that created the group.
    pub fn context_path(&self) -> &str {
        &self.context_path
    }

    /// Member ids, in the order they joined the group.
    pub fn scripts(&self) -> impl Iterator<Item = &ResourceId> {
        self.scripts.iter()
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.scripts.contains(id)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub fn supports_locale(&self, locale: &str) -> bool {
        self.supported_locales.contains(locale)
    }

    pub(crate) fn to_builder(self: &Arc<Self>) -> GroupBuilder {
        GroupBuilder {
            id: self.id.clone(),
            context_path: self.context_path.clone(),
            scripts: self.scripts.clone(),
            supported_locales: self.supported_locales.clone(),
            origin: Some(Arc::clone(self)),
            touched: false,
        }
    }
}

impl PartialEq for ScriptGroup {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ScriptGroup {}

impl Hash for ScriptGroup {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GroupBuilder {
    id: ResourceId,
    context_path: String,
    scripts: IndexSet<ResourceId>,
    supported_locales: IndexSet<String>,
    origin: Option<Arc<ScriptGroup>>,
    touched: bool,
}

impl GroupBuilder {
    pub(crate) fn new(name: &str, context_path: &str) -> Self {
        Self {
            id: ResourceId::group(name),
            context_path: context_path.to_string(),
            scripts: IndexSet::new(),
            supported_locales: IndexSet::new(),
            origin: None,
            touched: true,
        }
    }

    pub(crate) fn id(&self) -> &ResourceId {
        &self.id
    }

    pub(crate) fn add_script(&mut self, id: ResourceId) {
        if self.scripts.insert(id) {
            self.touched = true;
        }
    }

    pub(crate) fn remove_script(&mut self, id: &ResourceId) {
        if self.scripts.shift_remove(id) {
            self.touched = true;
        }
    }

    pub(crate) fn add_supported_locale(&mut self, locale: &str) {
        if self.supported_locales.insert(locale.to_string()) {
            self.touched = true;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    pub(crate) fn build(self) -> Arc<ScriptGroup> {
        if let (false, Some(origin)) = (self.touched, &self.origin) {
            return Arc::clone(origin);
        }
        Arc::new(ScriptGroup {
            id: self.id,
            context_path: self.context_path,
            scripts: self.scripts,
            supported_locales: self.supported_locales,
        })
    }
}
