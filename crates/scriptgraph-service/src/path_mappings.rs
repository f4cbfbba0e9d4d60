//! require.js path prefixes, attributed to the contexts that declared them.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::error::{Result, ServiceError};

#[derive(Debug, Default)]
struct Inner {
    entries: IndexMap<String, Vec<String>>,
    contexts: IndexMap<String, IndexSet<String>>,
}

/// Persistent map of path prefix to target paths.
///
/// Several contexts may declare the same prefix as long as they agree on its
/// targets; the prefix stays until the last of them is removed.
#[derive(Debug, Clone, Default)]
pub struct PathMappings {
    inner: Arc<Inner>,
}

impl PathMappings {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Prefixes and their targets, in declaration order.
    pub fn entries(&self) -> &IndexMap<String, Vec<String>> {
        &self.inner.entries
    }

    pub fn owners(&self, prefix: &str) -> Option<impl Iterator<Item = &str>> {
        self.inner
            .contexts
            .get(prefix)
            .map(|contexts| contexts.iter().map(String::as_str))
    }

    pub fn ptr_eq(&self, other: &PathMappings) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Add the entries of `context_path`. Fails without changing anything
    /// if a prefix is already mapped to different targets.
    pub fn add(&self, context_path: &str, entries: &IndexMap<String, Vec<String>>) -> Result<PathMappings> {
        if entries.is_empty() {
            return Ok(self.clone());
        }

        let mut next = Inner {
            entries: self.inner.entries.clone(),
            contexts: self.inner.contexts.clone(),
        };
        for (prefix, targets) in entries {
            match next.entries.get(prefix) {
                Some(existing) if existing == targets => {
                    next.contexts
                        .entry(prefix.clone())
                        .or_default()
                        .insert(context_path.to_string());
                }
                Some(existing) => {
                    return Err(ServiceError::DuplicatePathMapping {
                        prefix: prefix.clone(),
                        context_path: context_path.to_string(),
                        owners: next
                            .contexts
                            .get(prefix)
                            .map(|c| c.iter().cloned().collect())
                            .unwrap_or_default(),
                        existing: existing.clone(),
                    });
                }
                None => {
                    tracing::debug!("Adding path entry {} -> {:?}", prefix, targets);
                    next.entries.insert(prefix.clone(), targets.clone());
                    next.contexts
                        .insert(prefix.clone(), IndexSet::from([context_path.to_string()]));
                }
            }
        }
        Ok(PathMappings {
            inner: Arc::new(next),
        })
    }

    /// Drop the attribution of `context_path`. Returns the receiver itself
    /// when the context owned nothing.
    pub fn remove(&self, context_path: &str) -> PathMappings {
        if !self
            .inner
            .contexts
            .values()
            .any(|contexts| contexts.contains(context_path))
        {
            return self.clone();
        }

        let mut next = Inner {
            entries: self.inner.entries.clone(),
            contexts: self.inner.contexts.clone(),
        };
        next.contexts.retain(|prefix, contexts| {
            contexts.shift_remove(context_path);
            if contexts.is_empty() {
                next.entries.shift_remove(prefix);
                false
            } else {
                true
            }
        });
        PathMappings {
            inner: Arc::new(next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    #[test]
    fn shared_prefix_survives_until_last_owner_leaves() {
        let dojo = entries(&[("dojo", &["/dojo/dojo"])]);
        let paths = PathMappings::empty()
            .add("/a", &dojo)
            .unwrap()
            .add("/b", &dojo)
            .unwrap();
        assert_eq!(paths.owners("dojo").unwrap().collect::<Vec<_>>(), vec!["/a", "/b"]);

        let paths = paths.remove("/a");
        assert!(paths.entries().contains_key("dojo"));

        let paths = paths.remove("/b");
        assert!(paths.entries().is_empty());
        assert!(paths.owners("dojo").is_none());
    }

    #[test]
    fn conflicting_targets_are_rejected() {
        let paths = PathMappings::empty()
            .add("/a", &entries(&[("dojo", &["/dojo/dojo"])]))
            .unwrap();
        let err = paths
            .add("/b", &entries(&[("lib", &["/lib"]), ("dojo", &["/other"])]))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert!(!paths.entries().contains_key("lib"));
    }

    #[test]
    fn removing_an_unknown_context_keeps_the_snapshot() {
        let paths = PathMappings::empty()
            .add("/a", &entries(&[("x", &["/x"])]))
            .unwrap();
        assert!(paths.ptr_eq(&paths.remove("/nobody")));
        assert!(!paths.ptr_eq(&paths.remove("/a")));
    }
}
