//! Copy-on-write staging of a graph transaction.

use indexmap::IndexMap;

use super::GraphInner;
use crate::descriptor::{DependencyDescriptor, ScriptResourceDescriptor};
use crate::group::GroupBuilder;
use crate::resource::{DependencyInfo, ResourceBuilder};
use crate::{GraphError, ResourceId, Result};

/// Mutable copy of a graph, alive for the duration of one `add` or `remove`.
///
/// Dropping the builder discards the transaction; only [`GraphBuilder::build`]
/// produces a graph.
pub(super) struct GraphBuilder {
    resources: IndexMap<ResourceId, ResourceBuilder>,
    groups: IndexMap<String, GroupBuilder>,
    /// A resource was dropped, so closures must be recomputed before building.
    pruned: bool,
}

impl GraphBuilder {
    /// Stage every resource with an empty closure, then rebuild the closures
    /// from the recorded edges.
    pub(super) fn new(inner: &GraphInner) -> Self {
        let mut staged = Self {
            resources: inner
                .resources
                .iter()
                .map(|(id, resource)| (id.clone(), resource.to_builder()))
                .collect(),
            groups: inner
                .groups
                .iter()
                .map(|(name, group)| (name.clone(), group.to_builder()))
                .collect(),
            pruned: false,
        };
        staged.replay_dependencies();
        staged
    }

    /// Recompute every closure from scratch by linking each recorded edge again.
    fn replay_dependencies(&mut self) {
        for builder in self.resources.values_mut() {
            builder.closure.clear();
        }
        let edges: Vec<(ResourceId, ResourceId)> = self
            .resources
            .iter()
            .flat_map(|(id, builder)| {
                builder
                    .dependency_ids()
                    .map(move |target| (id.clone(), target.clone()))
            })
            .collect();
        for (source, target) in &edges {
            self.link(source, target);
        }
    }

    /// Stage a new resource and all of its dependency edges.
    pub(super) fn declare(&mut self, context_path: &str, desc: &ScriptResourceDescriptor) -> Result<()> {
        if self.resources.contains_key(&desc.id) {
            return Err(GraphError::DuplicateResourceKey(desc.id.clone()));
        }

        // Edges declared before this resource existed must agree with its mode.
        for builder in self.resources.values() {
            builder.check_dependency_fetch_mode(&desc.id, desc.fetch_mode)?;
        }

        let group_id = desc.group.as_deref().map(|name| {
            let group = self
                .groups
                .entry(name.to_string())
                .or_insert_with(|| GroupBuilder::new(name, context_path));
            group.add_script(desc.id.clone());
            for locale in &desc.supported_locales {
                group.add_supported_locale(locale);
            }
            group.id().clone()
        });

        let mut builder = ResourceBuilder::new(
            desc.id.clone(),
            desc.fetch_mode,
            desc.alias.clone(),
            group_id,
            desc.native_amd,
            context_path,
        );
        for module in &desc.modules {
            builder.add_module(module.to_module(context_path));
        }
        for locale in &desc.supported_locales {
            builder.add_supported_locale(locale);
        }
        self.resources.insert(desc.id.clone(), builder);

        for dependency in &desc.dependencies {
            self.add_dependency(context_path, &desc.id, dependency)?;
        }
        Ok(())
    }

    fn add_dependency(
        &mut self,
        context_path: &str,
        source: &ResourceId,
        dependency: &DependencyDescriptor,
    ) -> Result<()> {
        if dependency.id == *source {
            tracing::warn!(
                "Ignoring self-dependency declared for resource '{}'. To avoid this warning, remove the self-dependency declaration for '{}' in context '{}'",
                source,
                source,
                context_path
            );
            return Ok(());
        }

        let source_mode = match self.resources.get(source) {
            Some(builder) => builder.fetch_mode,
            None => return Ok(()),
        };

        if let Some(target) = self.resources.get(&dependency.id) {
            target.check_dependent_fetch_mode(source, source_mode)?;
            if target.closure.contains(source) {
                return Err(GraphError::InvalidResource(format!(
                    "Adding script dependency {} to {} would introduce a dependency circle",
                    dependency.id, source
                )));
            }
        }

        match self.resources.get_mut(source) {
            Some(builder) => builder.record_dependency(
                dependency.id.clone(),
                DependencyInfo {
                    alias: dependency.alias.clone(),
                    plugin_resource: dependency.plugin_resource.clone(),
                },
            ),
            None => return Ok(()),
        }
        self.link(source, &dependency.id);
        Ok(())
    }

    /// Add `target` and its closure to the closure of `source` and of
    /// everything that already reaches `source`.
    fn link(&mut self, source: &ResourceId, target: &ResourceId) {
        let inherited = self.resources.get(target).map(|t| t.closure.clone());
        let closure = {
            let Some(builder) = self.resources.get_mut(source) else {
                return;
            };
            if let Some(inherited) = inherited {
                builder.closure.extend(inherited);
            }
            builder.closure.insert(target.clone());
            builder.closure.clone()
        };

        for (id, builder) in self.resources.iter_mut() {
            if id != source {
                builder.closure_updated(source, &closure);
            }
        }
    }

    /// Drop `context_path`'s modules from a resource, and the resource itself
    /// once it has no module left. Returns `false` if the id is unknown.
    pub(super) fn remove(&mut self, context_path: &str, id: &ResourceId) -> bool {
        let Some(builder) = self.resources.get_mut(id) else {
            return false;
        };
        builder.remove_context(context_path);

        if builder.is_empty() {
            if let Some(removed) = self.resources.shift_remove(id) {
                self.pruned = true;
                if let Some(group_id) = &removed.group {
                    let now_empty = match self.groups.get_mut(group_id.name()) {
                        Some(group) => {
                            group.remove_script(id);
                            group.is_empty()
                        }
                        None => false,
                    };
                    if now_empty {
                        self.groups.shift_remove(group_id.name());
                    }
                }
            }
        }
        true
    }

    pub(super) fn build(mut self) -> GraphInner {
        if self.pruned {
            self.replay_dependencies();
        }
        GraphInner {
            resources: self
                .resources
                .into_iter()
                .map(|(id, builder)| (id, builder.build()))
                .collect(),
            groups: self
                .groups
                .into_iter()
                .map(|(name, builder)| (name, builder.build()))
                .collect(),
        }
    }
}
