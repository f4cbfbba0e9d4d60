//! # scriptgraph
//!
//! Immutable, versioned dependency graph of browser script resources.
//!
//! Web applications deployed into a portal contribute batches of script
//! resources. Each resource has an id (`SCOPE/name`), a fetch mode, modules
//! (the actual script sources, possibly from several contexts) and
//! dependencies on other resources. The graph:
//!
//! - keeps every resource's **closure**, the set of ids it transitively
//!   depends on, independent of the order resources were registered in
//! - rejects cycles and edges between different fetch modes atomically,
//!   per batch
//! - resolves a request set into an order where dependencies always come
//!   first
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 ScriptGraph                  │
//! │   (Arc snapshot, add/remove return new one)  │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!    ┌────────────────┐      ┌───────────────┐
//!    │ ScriptResource │─────▶│  ScriptGroup  │
//!    │ (node+closure) │      │ (load group)  │
//!    └────────────────┘      └───────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use scriptgraph::{FetchMode, ResourceId, ScriptGraph, ScriptResourceDescriptor};
//!
//! # fn main() -> scriptgraph::Result<()> {
//! let jquery = ResourceId::shared("jquery");
//! let app = ResourceId::shared("app");
//!
//! let graph = ScriptGraph::empty().add(
//!     "/portal",
//!     &[
//!         ScriptResourceDescriptor::on_load(app.clone()).depends_on(jquery.clone()),
//!         ScriptResourceDescriptor::on_load(jquery.clone()),
//!     ],
//! )?;
//!
//! let resolved = graph.resolve([(app.clone(), Some(FetchMode::OnLoad))]);
//! let ids: Vec<_> = resolved.keys().map(|r| r.id().clone()).collect();
//! assert_eq!(ids, vec![jquery, app]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! A snapshot is never mutated. Readers may keep resolving against an old
//! handle while a writer publishes a new one; the owner decides how handles
//! are swapped (see the `scriptgraph-service` crate).

pub mod descriptor;
pub mod error;
pub mod fetch_mode;
pub mod group;
pub mod module;
pub mod resource;
pub mod resource_id;
pub mod statistics;

mod graph;

pub use descriptor::{DependencyDescriptor, ModuleDescriptor, ScriptResourceDescriptor};
pub use error::{GraphError, Result};
pub use fetch_mode::FetchMode;
pub use graph::{Resolution, ScriptGraph};
pub use group::ScriptGroup;
pub use module::{Module, ModuleContent, ModuleSource};
pub use resource::{DependencyInfo, JS_IDENTIFIER, ScriptResource};
pub use resource_id::{ResourceId, ResourceIdError, ResourceScope};
pub use statistics::GraphStatistics;

#[cfg(test)]
mod tests;
