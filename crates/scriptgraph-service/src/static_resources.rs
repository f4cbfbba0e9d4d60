//! Static scripts served as plain files, keyed by resource path.

use std::sync::Arc;

use indexmap::IndexMap;
use scriptgraph_config::StaticScriptResource;

use crate::error::{Result, ServiceError};

/// Persistent map of resource path to static script.
#[derive(Debug, Clone, Default)]
pub struct StaticScriptResources {
    entries: Arc<IndexMap<String, StaticScriptResource>>,
}

impl StaticScriptResources {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, resource_path: &str) -> Option<&StaticScriptResource> {
        self.entries.get(resource_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ptr_eq(&self, other: &StaticScriptResources) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Add a batch; any path that is already served rejects the whole batch.
    pub fn add(&self, resources: &[StaticScriptResource]) -> Result<StaticScriptResources> {
        if resources.is_empty() {
            return Ok(self.clone());
        }

        let mut entries = (*self.entries).clone();
        for resource in resources {
            if let Some(existing) = entries.get(resource.resource_path()) {
                return Err(ServiceError::DuplicateStaticResource {
                    resource_path: resource.resource_path().to_string(),
                    owner: existing.context_path().to_string(),
                });
            }
            tracing::debug!(
                "Adding static script {} from {}",
                resource.resource_path(),
                resource.context_path()
            );
            entries.insert(resource.resource_path().to_string(), resource.clone());
        }
        Ok(StaticScriptResources {
            entries: Arc::new(entries),
        })
    }

    /// Drop every entry of `context_path`; the receiver itself if it had none.
    pub fn remove(&self, context_path: &str) -> StaticScriptResources {
        if !self.entries.values().any(|r| r.context_path() == context_path) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.retain(|_, r| r.context_path() != context_path);
        StaticScriptResources {
            entries: Arc::new(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn static_script(context: &str, path: &str) -> StaticScriptResource {
        StaticScriptResource::new(context, None, path).unwrap()
    }

    #[test]
    fn add_and_remove_by_context() {
        let statics = StaticScriptResources::empty()
            .add(&[static_script("/a", "/js/a.js"), static_script("/a", "/js/b.js")])
            .unwrap()
            .add(&[static_script("/b", "/js/c.js")])
            .unwrap();
        assert_eq!(statics.len(), 3);

        let statics = statics.remove("/a");
        assert_eq!(statics.len(), 1);
        assert!(statics.get("/js/c.js").is_some());
        assert!(statics.ptr_eq(&statics.remove("/a")));
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let statics = StaticScriptResources::empty()
            .add(&[static_script("/a", "/js/a.js")])
            .unwrap();
        let err = statics.add(&[static_script("/b", "/js/a.js")]).unwrap_err();
        assert!(err.is_duplicate());

        let err = StaticScriptResources::empty()
            .add(&[static_script("/a", "/x.js"), static_script("/a", "/x.js")])
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateStaticResource { .. }));
    }
}
