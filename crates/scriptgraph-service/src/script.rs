//! Assembly of the text served for a resource or a load group.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use scriptgraph::{
    FetchMode, JS_IDENTIFIER, Module, ModuleContent, ModuleSource, ResourceId, ResourceScope,
    ScriptGraph, ScriptResource,
};

use crate::error::{Result, ServiceError};
use crate::source::ScriptSource;

/// Module names the AMD loader provides itself.
pub const RESERVED_MODULES: [&str; 3] = ["require", "exports", "module"];

/// Global object of the portal's AMD loader in the browser.
pub const LOADER_GLOBAL: &str = "eXo";

/// Parameter names that already carry a numeric suffix, e.g. `dom_2`.
static INDEXED_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+?(_([1-9]+))$").expect("index pattern is valid"));

/// Text of `id`: a single resource, or every member of a GROUP id between
/// `//Begin` and `//End` markers. `None` if nothing is registered under `id`.
pub fn assemble(
    graph: &ScriptGraph,
    source: &dyn ScriptSource,
    id: &ResourceId,
    locale: Option<&str>,
) -> Result<Option<String>> {
    if id.scope() == ResourceScope::Group {
        let Some(group) = graph.load_group(id.name()) else {
            return Ok(None);
        };
        let mut out = String::new();
        for member in group.scripts() {
            if let Some(text) = assemble(graph, source, member, locale)? {
                out.push_str(&format!("\n//Begin {member}"));
                out.push_str(&text);
                out.push_str(&format!("\n//End {member}"));
            }
        }
        return Ok(Some(out));
    }

    let Some(resource) = graph.resource(id) else {
        return Ok(None);
    };

    let mut modules: Vec<&Module> = resource.modules().iter().collect();
    modules.sort_by_key(|m| m.priority);

    let mut body = String::new();
    for module in modules {
        if let Some(text) = read_module(source, module, locale)? {
            body.push_str(normalize(&text));
        }
    }

    let out = if resource.is_native_amd() {
        body
    } else if resource.fetch_mode() == FetchMode::OnLoad {
        format!("{}{body}\n}});", define_header(graph, &resource))
    } else {
        format!(
            "{body}\nif (typeof define === 'function' && define.amd && !require.specified('{id}')) {{define('{id}');}}"
        )
    };
    Ok(Some(out))
}

fn read_module(source: &dyn ScriptSource, module: &Module, locale: Option<&str>) -> Result<Option<String>> {
    let ModuleSource::Local { contents, .. } = &module.source else {
        return Ok(None);
    };

    let mut parts = Vec::with_capacity(contents.len());
    for content in contents {
        match content {
            ModuleContent::Inline(text) => parts.push(text.clone()),
            ModuleContent::Path(path) => {
                let text = source
                    .read(&module.context_path, path, locale)
                    .map_err(|err| ServiceError::Read {
                        context_path: module.context_path.clone(),
                        path: path.clone(),
                        source: err,
                    })?;
                match text {
                    Some(text) => parts.push(text),
                    None => return Ok(None),
                }
            }
        }
    }
    Ok(Some(parts.join("\n")))
}

/// Drop leading whitespace and comments, so that a module can follow
/// `return ` in the AMD factory.
pub fn normalize(text: &str) -> &str {
    let mut rest = text;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail);
        } else {
            return rest;
        }
    }
}

/// Opening of the `define` call wrapping an ON_LOAD resource.
fn define_header(graph: &ScriptGraph, resource: &Arc<ScriptResource>) -> String {
    let mut deps = Vec::new();
    let mut params: Vec<String> = Vec::new();
    let mut arg_names = Vec::new();

    for dep_id in resource.dependencies() {
        if let Some(dep) = graph.resource(dep_id) {
            for info in resource.dependency_info(dep_id).into_iter().flatten() {
                let alias = info.alias.as_deref().unwrap_or(dep.alias());
                let plugin = info.plugin_resource.as_deref();
                deps.push(with_plugin(&dep.id().to_string(), plugin));
                let param = encode(&params, alias);
                params.push(param);
                arg_names.push(with_plugin(alias, plugin));
            }
        } else if RESERVED_MODULES.contains(&dep_id.name()) {
            let reserved = dep_id.name().to_string();
            deps.push(reserved.clone());
            params.push(reserved.clone());
            arg_names.push(reserved);
        }
    }

    let arg_values: Vec<String> = params
        .iter()
        .map(|p| {
            if p == "require" {
                format!("{LOADER_GLOBAL}.require")
            } else {
                p.clone()
            }
        })
        .collect();

    format!(
        "\ndefine('{id}', {deps}, function({params}) {{\nvar require = {g}.require, requirejs = {g}.require,define = {g}.define;\n{g}.define.names={names};\n{g}.define.deps=[{values}];\nreturn ",
        id = resource.id(),
        deps = serde_json::Value::from(deps),
        params = params.join(","),
        g = LOADER_GLOBAL,
        names = serde_json::Value::from(arg_names),
        values = arg_values.join(","),
    )
}

fn with_plugin(name: &str, plugin: Option<&str>) -> String {
    match plugin {
        Some(plugin) => format!("{name}!{plugin}"),
        None => name.to_string(),
    }
}

/// Turn `alias` into a factory parameter name not yet used in `params`.
///
/// `/` becomes `_`; anything else invalid becomes `alias`. A name already
/// taken gets the next free `_N` suffix.
pub fn encode(params: &[String], alias: &str) -> String {
    let mut alias = alias.replace('/', "_");
    if !JS_IDENTIFIER.is_match(&alias) {
        tracing::error!("alias {} is not valid, changing to default 'alias' name", alias);
        alias = "alias".to_string();
    }

    let taken = params.iter().rev().find_map(|param| match INDEXED_PARAM.captures(param) {
        Some(caps) => {
            let suffix = caps.get(1)?.as_str();
            let index = caps.get(2)?.as_str().parse::<usize>().ok()?;
            (param.strip_suffix(suffix) == Some(alias.as_str())).then_some(index)
        }
        None => (*param == alias).then_some(0),
    });

    match taken {
        Some(index) => {
            let indexed = format!("{alias}_{}", index + 1);
            tracing::warn!("alias {} is duplicated, adding index: {}", alias, indexed);
            indexed
        }
        None => alias,
    }
}
