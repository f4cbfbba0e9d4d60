mod property_tests;

use crate::{FetchMode, ResourceId, ResourceScope, ScriptGraph, ScriptResourceDescriptor};

pub(crate) fn shared(name: &str) -> ResourceId {
    ResourceId::shared(name)
}

pub(crate) fn immediate(name: &str) -> ScriptResourceDescriptor {
    ScriptResourceDescriptor::immediate(shared(name))
}

pub(crate) fn on_load(name: &str) -> ScriptResourceDescriptor {
    ScriptResourceDescriptor::on_load(shared(name))
}

/// Ids of a resolution, in order.
pub(crate) fn resolved_ids<I>(graph: &ScriptGraph, request: I) -> Vec<ResourceId>
where
    I: IntoIterator<Item = (ResourceId, Option<FetchMode>)>,
{
    graph.resolve(request).keys().map(|r| r.id().clone()).collect()
}

pub(crate) fn closure_of(graph: &ScriptGraph, name: &str) -> Vec<ResourceId> {
    let resource = graph.resource(&shared(name)).expect("resource is registered");
    let mut ids: Vec<_> = resource.closure().iter().cloned().collect();
    ids.sort();
    ids
}

pub(crate) fn ids(names: &[&str]) -> Vec<ResourceId> {
    let mut ids: Vec<_> = names.iter().map(|n| shared(n)).collect();
    ids.sort();
    ids
}

pub(crate) fn count(graph: &ScriptGraph, scope: ResourceScope) -> usize {
    graph.resources(scope).len()
}
