//! Dependency-ordered resolution of a request set.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use indexmap::IndexMap;

use super::ScriptGraph;
use crate::{FetchMode, ResourceId, ScriptResource};

/// Resolved resources in evaluation order, with the mode each is fetched in.
pub type Resolution = IndexMap<Arc<ScriptResource>, FetchMode>;

impl ScriptGraph {
    /// Resolve requested ids into a dependency-safe delivery order.
    ///
    /// Unknown ids are skipped, as are requests whose mode does not match the
    /// resource. Accepted resources pull in their whole closure. In the result
    /// a resource never precedes one of its dependencies, and unrelated
    /// resources keep the order in which they were first reached.
    pub fn resolve<I>(&self, request: I) -> Resolution
    where
        I: IntoIterator<Item = (ResourceId, Option<FetchMode>)>,
    {
        let mut collected: IndexMap<ResourceId, Arc<ScriptResource>> = IndexMap::new();

        for (id, requested) in request {
            let Some(resource) = self.inner.resources.get(&id) else {
                continue;
            };
            if requested.is_some_and(|mode| mode != resource.fetch_mode()) {
                continue;
            }
            self.collect(resource, &mut collected);
        }

        order_by_closure(collected.into_values().collect())
    }

    /// Depth-first collection of `resource` and everything it depends on.
    fn collect(&self, resource: &Arc<ScriptResource>, collected: &mut IndexMap<ResourceId, Arc<ScriptResource>>) {
        if collected.contains_key(resource.id()) {
            return;
        }
        collected.insert(resource.id().clone(), Arc::clone(resource));
        for dependency in resource.dependencies() {
            if let Some(target) = self.inner.resources.get(dependency) {
                self.collect(target, collected);
            }
        }
    }
}

/// Stable topological selection: repeatedly emit the earliest entry whose
/// collected closure members have all been emitted.
fn order_by_closure(entries: Vec<Arc<ScriptResource>>) -> Resolution {
    let index: IndexMap<&ResourceId, usize> = entries
        .iter()
        .enumerate()
        .map(|(position, resource)| (resource.id(), position))
        .collect();

    let mut pending = vec![0usize; entries.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); entries.len()];
    for (position, resource) in entries.iter().enumerate() {
        for member in resource.closure() {
            if let Some(&dependency) = index.get(member) {
                pending[position] += 1;
                dependents[dependency].push(position);
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = pending
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(position, _)| Reverse(position))
        .collect();

    let mut resolution = Resolution::with_capacity(entries.len());
    while let Some(Reverse(position)) = ready.pop() {
        let resource = &entries[position];
        resolution.insert(Arc::clone(resource), resource.fetch_mode());
        for &dependent in &dependents[position] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }
    resolution
}
