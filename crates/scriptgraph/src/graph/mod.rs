//! Persistent ScriptGraph implementation.
//!
//! A `ScriptGraph` is a cheap handle around an immutable [`GraphInner`].
//! Mutations stage a copy of the graph in a [`staging::GraphBuilder`],
//! validate the whole batch, and only then freeze a new inner value. Old
//! handles keep seeing their own snapshot.

mod mutations;
mod queries;
mod resolve;
mod serialization;
mod staging;
mod statistics;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{ResourceId, ScriptGroup, ScriptResource};

pub use resolve::Resolution;

/// Frozen graph content. Every collection reachable from here is shared
/// read-only between snapshots.
#[derive(Debug, Default)]
pub(crate) struct GraphInner {
    /// All resources, in registration order.
    pub(crate) resources: IndexMap<ResourceId, Arc<ScriptResource>>,
    /// Load groups keyed by name.
    pub(crate) groups: IndexMap<String, Arc<ScriptGroup>>,
}

/// Immutable, versioned dependency graph of script resources.
///
/// `add` and `remove` never modify the receiver: they return a new snapshot.
/// Cloning is cheap and shares the snapshot, which makes publishing a new
/// graph a single reference swap for the owner.
///
/// # Example
///
/// ```rust
/// use scriptgraph::{ResourceId, ScriptGraph, ScriptResourceDescriptor as Desc};
///
/// # fn main() -> scriptgraph::Result<()> {
/// let (a, b) = (ResourceId::shared("a"), ResourceId::shared("b"));
/// let graph = ScriptGraph::empty().add(
///     "/app",
///     &[Desc::immediate(a.clone()).depends_on(b.clone()), Desc::immediate(b.clone())],
/// )?;
///
/// let order: Vec<_> = graph
///     .resolve([(a.clone(), None)])
///     .keys()
///     .map(|r| r.id().clone())
///     .collect();
/// assert_eq!(order, vec![b, a]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptGraph {
    pub(crate) inner: Arc<GraphInner>,
}

impl ScriptGraph {
    /// The initial graph, with no resources and no groups.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// `true` when both handles point at the very same snapshot.
    pub fn ptr_eq(&self, other: &ScriptGraph) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
