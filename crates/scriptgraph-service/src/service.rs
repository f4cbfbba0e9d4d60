//! The script service: current graph, path mappings and static scripts.

use std::sync::Arc;

use parking_lot::RwLock;
use scriptgraph::{FetchMode, Resolution, ResourceId, ScriptGraph, ScriptResource};
use scriptgraph_config::{ScriptResources, ServiceSettings, StaticScriptResource};
use serde_json::Value;

use crate::error::Result;
use crate::js_config;
use crate::path_mappings::PathMappings;
use crate::script;
use crate::source::ScriptSource;
use crate::static_resources::StaticScriptResources;
use crate::url::{UrlBuilder, generate_url};

/// Everything published together by one registration.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    graph: ScriptGraph,
    paths: PathMappings,
    statics: StaticScriptResources,
}

/// Registers the script resources of deployed contexts and serves them.
///
/// Readers work on a snapshot taken under a short read lock. Writers hold
/// the write lock while they compute the next snapshot, so registrations are
/// serialized and a failed one publishes nothing.
pub struct ScriptService<S> {
    settings: ServiceSettings,
    urls: UrlBuilder,
    source: S,
    state: RwLock<Snapshot>,
}

impl<S: ScriptSource> ScriptService<S> {
    pub fn new(settings: ServiceSettings, source: S) -> Self {
        Self {
            urls: UrlBuilder::new(&settings),
            settings,
            source,
            state: RwLock::new(Snapshot::default()),
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    fn snapshot(&self) -> Snapshot {
        self.state.read().clone()
    }

    /// Current graph snapshot.
    pub fn graph(&self) -> ScriptGraph {
        self.state.read().graph.clone()
    }

    pub fn path_mappings(&self) -> PathMappings {
        self.state.read().paths.clone()
    }

    /// Register what one context declares. All or nothing.
    pub fn register(&self, resources: &ScriptResources) -> Result<()> {
        let mut state = self.state.write();

        let statics = state.statics.add(&resources.static_resources)?;
        let paths = state.paths.add(&resources.context_path, &resources.paths)?;
        let graph = state.graph.add(&resources.context_path, &resources.descriptors)?;

        *state = Snapshot {
            graph,
            paths,
            statics,
        };
        tracing::info!(
            "Registered {} script resource(s) of context '{}'",
            resources.descriptors.len(),
            resources.context_path
        );
        Ok(())
    }

    /// Unregister what `resources` registered before. Never fails.
    pub fn unregister(&self, resources: &ScriptResources) {
        let mut state = self.state.write();
        let context_path = resources.context_path.as_str();

        let graph = state.graph.remove(context_path, &resources.descriptors);
        let statics = if resources.static_resources.is_empty() {
            state.statics.clone()
        } else {
            state.statics.remove(context_path)
        };
        let paths = if resources.paths.is_empty() {
            state.paths.clone()
        } else {
            state.paths.remove(context_path)
        };

        *state = Snapshot {
            graph,
            paths,
            statics,
        };
        tracing::info!("Unregistered script resources of context '{}'", context_path);
    }

    pub fn resource(&self, id: &ResourceId) -> Option<Arc<ScriptResource>> {
        self.state.read().graph.resource(id)
    }

    pub fn resolve_ids<I>(&self, ids: I) -> Resolution
    where
        I: IntoIterator<Item = (ResourceId, Option<FetchMode>)>,
    {
        self.graph().resolve(ids)
    }

    pub fn static_resource(&self, resource_path: &str) -> Option<StaticScriptResource> {
        self.state.read().statics.get(resource_path).cloned()
    }

    /// Text served for a resource or a GROUP id.
    pub fn script(&self, id: &ResourceId, locale: Option<&str>) -> Result<Option<String>> {
        script::assemble(&self.graph(), &self.source, id, locale)
    }

    /// URL of a resource or load group.
    pub fn generate_url(&self, id: &ResourceId, minified: bool, locale: Option<&str>) -> Option<String> {
        generate_url(&self.graph(), &self.urls, id, minified, locale)
    }

    /// require.js configuration. Outside development mode URLs point at
    /// minified scripts.
    pub fn js_config(&self, locale: Option<&str>) -> Value {
        let snapshot = self.snapshot();
        js_config::build(
            &snapshot.graph,
            &snapshot.paths,
            &self.urls,
            !self.settings.development,
            locale,
        )
    }
}
