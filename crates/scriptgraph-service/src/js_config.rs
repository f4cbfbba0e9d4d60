//! require.js configuration for the browser.

use indexmap::IndexMap;
use scriptgraph::{FetchMode, ResourceId, ResourceScope, ScriptGraph};
use serde_json::{Map, Value, json};

use crate::path_mappings::PathMappings;
use crate::url::{UrlBuilder, generate_url};

/// Build `{ baseUrl, paths, shim }`.
///
/// Paths hold the declared path mappings, then one URL (without `.js`) per
/// resource; members of a load group share the group's URL. IMMEDIATE and
/// remote resources with dependencies get a `shim` entry. Native AMD
/// resources are left to the loader's defaults.
pub fn build(
    graph: &ScriptGraph,
    mappings: &PathMappings,
    urls: &UrlBuilder,
    minified: bool,
    locale: Option<&str>,
) -> Value {
    let mut paths = Map::new();
    let mut shim = Map::new();

    for (prefix, targets) in mappings.entries() {
        let value = match targets.as_slice() {
            [single] => Value::from(single.clone()),
            many => Value::from(many.to_vec()),
        };
        paths.insert(prefix.clone(), value);
    }

    let mut group_urls: IndexMap<ResourceId, Option<String>> = IndexMap::new();
    for resource in graph.all_resources() {
        if resource.is_native_amd() {
            continue;
        }
        if resource.is_empty() && resource.id().scope() != ResourceScope::Shared {
            continue;
        }
        let name = resource.id().to_string();
        let is_remote = resource.modules().first().is_some_and(|m| m.is_remote());

        if resource.fetch_mode() == FetchMode::Immediate || is_remote {
            let deps: Vec<Value> = resource
                .dependencies()
                .filter(|id| graph.contains(id))
                .map(|id| Value::from(id.to_string()))
                .collect();
            if !deps.is_empty() {
                shim.insert(name.clone(), json!({ "deps": deps }));
            }
        }

        let url = match resource.group() {
            Some(group_id) => group_urls
                .entry(group_id.clone())
                .or_insert_with(|| module_url(graph, urls, group_id, minified, locale))
                .clone(),
            None => module_url(graph, urls, resource.id(), minified, locale),
        };
        if let Some(url) = url {
            paths.insert(name, Value::from(url));
        }
    }

    json!({
        "baseUrl": urls.shared_base(),
        "paths": paths,
        "shim": shim,
    })
}

/// require.js module paths omit the `.js` extension.
fn module_url(
    graph: &ScriptGraph,
    urls: &UrlBuilder,
    id: &ResourceId,
    minified: bool,
    locale: Option<&str>,
) -> Option<String> {
    let url = generate_url(graph, urls, id, minified, locale)?;
    url.strip_suffix(".js").map(str::to_string)
}
