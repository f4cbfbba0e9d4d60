//! # scriptgraph-service
//!
//! Keeps the script resources of every deployed context registered in one
//! [`ScriptGraph`](scriptgraph::ScriptGraph) and turns them into what a
//! browser needs: script text, URLs and a require.js configuration.
//!
//! ```rust
//! use scriptgraph::{ResourceId, ScriptResourceDescriptor};
//! use scriptgraph_config::{ScriptResources, ServiceSettings};
//! use scriptgraph_service::{FsScriptSource, ScriptService};
//!
//! # fn main() -> scriptgraph_service::Result<()> {
//! let service = ScriptService::new(ServiceSettings::default(), FsScriptSource::new());
//!
//! let mut resources = ScriptResources::new("/app");
//! resources
//!     .descriptors
//!     .push(ScriptResourceDescriptor::on_load(ResourceId::shared("app")));
//! service.register(&resources)?;
//!
//! assert!(service.resource(&ResourceId::shared("app")).is_some());
//! service.unregister(&resources);
//! assert!(service.graph().is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod js_config;
pub mod path_mappings;
pub mod script;
pub mod service;
pub mod source;
pub mod static_resources;
pub mod url;

pub use error::{Result, ServiceError};
pub use path_mappings::PathMappings;
pub use service::ScriptService;
pub use source::{FsScriptSource, ScriptSource};
pub use static_resources::StaticScriptResources;
pub use url::UrlBuilder;

#[cfg(test)]
mod tests;
