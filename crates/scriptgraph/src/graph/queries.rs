//! Read accessors for ScriptGraph.

use std::sync::Arc;

use super::ScriptGraph;
use crate::{ResourceId, ResourceScope, ScriptGroup, ScriptResource};

impl ScriptGraph {
    /// Look up a resource. Group ids never resolve here; see [`Self::load_group`].
    pub fn resource(&self, id: &ResourceId) -> Option<Arc<ScriptResource>> {
        self.inner.resources.get(id).cloned()
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.inner.resources.contains_key(id)
    }

    /// Resources of one scope, in registration order.
    pub fn resources(&self, scope: ResourceScope) -> Vec<Arc<ScriptResource>> {
        self.inner
            .resources
            .values()
            .filter(|resource| resource.id().scope() == scope)
            .cloned()
            .collect()
    }

    /// Every resource, scope by scope in [`ResourceScope::ALL`] order.
    pub fn all_resources(&self) -> Vec<Arc<ScriptResource>> {
        ResourceScope::ALL
            .into_iter()
            .flat_map(|scope| self.resources(scope))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.resources.is_empty()
    }

    pub fn load_group(&self, name: &str) -> Option<Arc<ScriptGroup>> {
        self.inner.groups.get(name).cloned()
    }

    pub fn groups(&self) -> Vec<Arc<ScriptGroup>> {
        self.inner.groups.values().cloned().collect()
    }
}
