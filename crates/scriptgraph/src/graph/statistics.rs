//! Statistics methods for ScriptGraph.

use indexmap::IndexSet;

use super::ScriptGraph;
use crate::{FetchMode, GraphStatistics, ResourceScope};

impl ScriptGraph {
    /// Compute a statistics snapshot.
    pub fn statistics(&self) -> GraphStatistics {
        let resources = &self.inner.resources;

        let by_scope = ResourceScope::ALL
            .into_iter()
            .map(|scope| (scope, resources.keys().filter(|id| id.scope() == scope).count()))
            .collect();
        let immediate_count = resources
            .values()
            .filter(|r| r.fetch_mode() == FetchMode::Immediate)
            .count();

        let mut unresolved = IndexSet::new();
        let mut edge_count = 0;
        for resource in resources.values() {
            for dependency in resource.dependencies() {
                edge_count += 1;
                if !resources.contains_key(dependency) {
                    unresolved.insert(dependency.clone());
                }
            }
        }

        GraphStatistics {
            resource_count: resources.len(),
            by_scope,
            immediate_count,
            on_load_count: resources.len() - immediate_count,
            group_count: self.inner.groups.len(),
            edge_count,
            unresolved: unresolved.into_iter().collect(),
        }
    }
}
