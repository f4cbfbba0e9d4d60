//! Script descriptor files (`scripts.toml` or `scripts.json`).
//!
//! A descriptor file lists what one deployed context contributes:
//!
//! ```toml
//! [paths]
//! "dojo" = ["/dojo/dojo"]
//!
//! [[module]]
//! name = "jquery"
//! as = "$"
//! [[module.script]]
//! path = "/js/jquery.js"
//!
//! [[scripts]]
//! name = "bootstrap"
//! [[scripts.depends]]
//! scripts = "base"
//! ```
//!
//! `[[module]]` declares SHARED ON_LOAD resources and `[[scripts]]` SHARED
//! IMMEDIATE ones. `[[portal]]` and `[[portlet]]` use their own scopes and
//! default to IMMEDIATE; a portlet's name is prefixed by the context path.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use scriptgraph::{
    DependencyDescriptor, FetchMode, ModuleContent, ModuleDescriptor, ModuleSource, ResourceId,
    ResourceScope, ScriptResourceDescriptor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::amd::AmdFileset;
use crate::error::{ConfigError, Result};
use crate::resources::{ScriptResources, StaticScriptResource};

/// One part of an adapter: inline text or a file to include.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdapterPart {
    Include { include: String },
    Text(String),
}

/// A `[[….script]]` entry: a file path, or an adapter wrapping several parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScriptEntry {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub adapter: Vec<AdapterPart>,
    #[serde(default)]
    pub resource_bundle: Option<String>,
}

impl ScriptEntry {
    fn contents(&self) -> Vec<ModuleContent> {
        if let Some(path) = &self.path {
            return vec![ModuleContent::Path(path.clone())];
        }
        self.adapter
            .iter()
            .map(|part| match part {
                AdapterPart::Include { include } => ModuleContent::Path(include.clone()),
                AdapterPart::Text(text) => ModuleContent::Inline(text.trim().to_string()),
            })
            .collect()
    }
}

/// A `[[….depends]]` entry. Dependencies always live in the SHARED scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependsEntry {
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub scripts: Option<String>,
    #[serde(default, rename = "as")]
    pub alias: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
}

/// Fields shared by every kind of resource entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceEntry {
    pub name: String,
    #[serde(default, rename = "as")]
    pub alias: Option<String>,
    #[serde(default)]
    pub load_group: Option<String>,
    #[serde(default)]
    pub amd: bool,
    /// Remote location; the resource is then never served locally.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub supported_locales: Vec<String>,
    #[serde(default)]
    pub script: Vec<ScriptEntry>,
    #[serde(default)]
    pub depends: Vec<DependsEntry>,
}

/// A `[[portal]]` or `[[portlet]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScopedEntry {
    #[serde(flatten)]
    pub entry: ResourceEntry,
    #[serde(default = "default_scoped_fetch_mode")]
    pub fetch_mode: FetchMode,
}

fn default_scoped_fetch_mode() -> FetchMode {
    FetchMode::Immediate
}

/// A `[[static]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticEntry {
    #[serde(default)]
    pub directory: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmdSection {
    #[serde(default)]
    pub fileset: Vec<AmdFileset>,
}

/// Parsed content of a descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorFile {
    #[serde(default)]
    pub module: Vec<ResourceEntry>,
    #[serde(default)]
    pub scripts: Vec<ResourceEntry>,
    #[serde(default)]
    pub portlet: Vec<ScopedEntry>,
    #[serde(default)]
    pub portal: Vec<ScopedEntry>,
    #[serde(default)]
    pub paths: IndexMap<String, Vec<String>>,
    #[serde(default, rename = "static")]
    pub static_scripts: Vec<StaticEntry>,
    #[serde(default)]
    pub amd: AmdSection,
}

impl DescriptorFile {
    /// Load a `.toml` or `.json` descriptor file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;

        let value = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                let toml_val: toml::Value = toml::from_str(&content)
                    .map_err(|e| ConfigError::invalid("toml", format!("Invalid TOML syntax: {e}")))?;
                serde_json::to_value(toml_val).map_err(|e| {
                    ConfigError::invalid("toml", format!("TOML to JSON conversion failed: {e}"))
                })?
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| ConfigError::invalid("json", format!("Invalid JSON: {e}")))?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ));
            }
        };

        tracing::debug!("Loaded descriptor file {}", path.display());
        Self::from_value(value)
    }

    /// Build from a JSON value, for descriptors that do not come from a file.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid("descriptor", e.to_string()))
    }

    /// Turn the file into what `context_path` registers.
    ///
    /// `root` is the directory the context is served from; AMD filesets are
    /// scanned below it.
    pub fn into_resources(self, context_path: &str, root: &Path) -> Result<ScriptResources> {
        let mut resources = ScriptResources::new(context_path);

        for entry in self.module {
            resources
                .descriptors
                .push(describe(ResourceScope::Shared, entry, FetchMode::OnLoad)?);
        }
        for entry in self.scripts {
            resources
                .descriptors
                .push(describe(ResourceScope::Shared, entry, FetchMode::Immediate)?);
        }
        for ScopedEntry { mut entry, fetch_mode } in self.portlet {
            entry.name = format!("{}/{}", context_path.trim_start_matches('/'), entry.name);
            resources
                .descriptors
                .push(describe(ResourceScope::Portlet, entry, fetch_mode)?);
        }
        for ScopedEntry { entry, fetch_mode } in self.portal {
            resources
                .descriptors
                .push(describe(ResourceScope::Portal, entry, fetch_mode)?);
        }
        for fileset in &self.amd.fileset {
            resources.descriptors.extend(fileset.scan(root)?);
        }

        for entry in self.static_scripts {
            resources.static_resources.push(StaticScriptResource::new(
                context_path,
                entry.directory.as_deref(),
                &entry.path,
            )?);
        }

        for (prefix, targets) in self.paths {
            if targets.is_empty() {
                return Err(ConfigError::invalid(
                    format!("paths.{prefix}"),
                    "a path mapping needs at least one target path",
                ));
            }
            resources.paths.insert(prefix, targets);
        }

        Ok(resources)
    }
}

fn describe(scope: ResourceScope, entry: ResourceEntry, fetch_mode: FetchMode) -> Result<ScriptResourceDescriptor> {
    if entry.name.is_empty() {
        return Err(ConfigError::invalid("name", "resource names cannot be empty"));
    }

    let mut desc = ScriptResourceDescriptor::new(ResourceId::new(scope, entry.name), fetch_mode)
        .native_amd(entry.amd);
    desc.alias = entry.alias;

    match entry.url {
        Some(url) => {
            desc = desc.module(ModuleDescriptor::remote(url));
        }
        None => {
            // Load groups only apply to locally served modules.
            if fetch_mode == FetchMode::OnLoad {
                desc.group = entry.load_group.filter(|g| !g.trim().is_empty());
            }
            for locale in entry.supported_locales {
                desc = desc.supported_locale(locale);
            }
            for script in &entry.script {
                desc = desc.module(ModuleDescriptor::new(ModuleSource::Local {
                    contents: script.contents(),
                    resource_bundle: script.resource_bundle.clone(),
                }));
            }
        }
    }

    for depends in entry.depends {
        let Some(name) = depends.module.or(depends.scripts) else {
            return Err(ConfigError::invalid(
                format!("{}.depends", desc.id),
                "expected a 'module' or 'scripts' name",
            ));
        };
        let mut dependency = DependencyDescriptor::new(ResourceId::shared(name));
        dependency.alias = depends.alias;
        dependency.plugin_resource = depends.resource;
        desc = desc.with_dependency(dependency);
    }

    Ok(desc)
}

/// Default descriptor file name looked up in a context root.
pub const DEFAULT_DESCRIPTOR: &str = "scripts.toml";

/// Find the descriptor of a context root: `scripts.toml`, then `scripts.json`.
pub fn find_descriptor(root: &Path) -> Option<PathBuf> {
    [DEFAULT_DESCRIPTOR, "scripts.json"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.exists())
}
