//! Mutation methods for ScriptGraph. Both return new snapshots.

use super::staging::GraphBuilder;
use super::ScriptGraph;
use crate::descriptor::ScriptResourceDescriptor;
use crate::{GraphError, Result};

impl ScriptGraph {
    /// Register a batch of descriptors for `context_path`.
    ///
    /// The batch is all-or-nothing. It is rejected with
    /// [`GraphError::DuplicateResourceKey`] if any id is already registered
    /// (by any context) or appears twice in the batch, and with
    /// [`GraphError::InvalidResource`] if an edge would close a cycle or join
    /// two fetch modes. The closure of every resource is the same whatever
    /// order the descriptors come in.
    pub fn add(&self, context_path: &str, descriptors: &[ScriptResourceDescriptor]) -> Result<ScriptGraph> {
        if let Some(duplicate) = descriptors
            .iter()
            .find(|desc| self.inner.resources.contains_key(&desc.id))
        {
            return Err(GraphError::DuplicateResourceKey(duplicate.id.clone()));
        }

        let mut staged = GraphBuilder::new(&self.inner);
        for desc in descriptors {
            staged.declare(context_path, desc)?;
        }

        tracing::debug!(
            "Registered {} script resource(s) for context '{}'",
            descriptors.len(),
            context_path
        );
        Ok(ScriptGraph::from_inner(staged.build()))
    }

    /// Unregister what `context_path` contributed to the named resources.
    ///
    /// A resource keeps existing while it still has modules from another
    /// context, and the closures of the survivors are recomputed. Unknown ids
    /// are ignored. When none of the ids exist the returned
    /// handle is the receiver itself (see [`ScriptGraph::ptr_eq`]).
    pub fn remove(&self, context_path: &str, descriptors: &[ScriptResourceDescriptor]) -> ScriptGraph {
        if !descriptors
            .iter()
            .any(|desc| self.inner.resources.contains_key(&desc.id))
        {
            return self.clone();
        }

        let mut staged = GraphBuilder::new(&self.inner);
        let mut removed = 0;
        for desc in descriptors {
            if staged.remove(context_path, &desc.id) {
                removed += 1;
            }
        }

        tracing::debug!(
            "Unregistered {} script resource(s) for context '{}'",
            removed,
            context_path
        );
        ScriptGraph::from_inner(staged.build())
    }
}
