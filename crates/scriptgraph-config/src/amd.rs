//! Native AMD filesets: every matching `.js` file under a directory becomes
//! an ON_LOAD resource that is served as is.

use std::path::Path;

use glob_match::glob_match;
use scriptgraph::{ModuleDescriptor, ResourceId, ScriptResourceDescriptor};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::{ConfigError, Result};

/// Reserved words that cannot be used as a factory parameter name.
const JS_KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

const AMD_EXTENSION: &str = ".js";

/// One `[[amd.fileset]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AmdFileset {
    /// Directory inside the context, e.g. `/js/amd`.
    pub directory: String,
    /// Globs relative to `directory`; empty means everything.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl AmdFileset {
    fn is_selected(&self, relative: &str) -> bool {
        let included =
            self.includes.is_empty() || self.includes.iter().any(|g| glob_match(g, relative));
        included && !self.excludes.iter().any(|g| glob_match(g, relative))
    }

    /// Scan the fileset below `root`, the directory the context is served from.
    ///
    /// Files are visited in file-name order so the result is stable.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScriptResourceDescriptor>> {
        let directory = self.directory.trim_end_matches('/');
        let base = root.join(directory.trim_start_matches('/'));
        if !base.is_dir() {
            return Err(ConfigError::NotFound(base));
        }

        let mut descriptors = Vec::new();
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = entry.map_err(|e| ConfigError::invalid("amd.fileset", e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&base) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let Some(module_name) = relative.strip_suffix(AMD_EXTENSION) else {
                continue;
            };
            if !self.is_selected(&relative) {
                continue;
            }

            tracing::debug!("Found native AMD module '{}' in {}", module_name, self.directory);
            descriptors.push(
                ScriptResourceDescriptor::on_load(ResourceId::shared(module_name))
                    .alias(to_module_alias(module_name))
                    .native_amd(true)
                    .module(
                        ModuleDescriptor::local_path(format!("{directory}/{relative}"))
                            .with_priority(i32::MAX),
                    ),
            );
        }
        Ok(descriptors)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_numeric()
}

/// Turn a module path into a JavaScript identifier.
///
/// Characters that cannot appear in an identifier are dropped and the
/// following character is upper-cased; a keyword gets a trailing `_`.
///
/// ```
/// use scriptgraph_config::to_module_alias;
///
/// assert_eq!(to_module_alias("dojo/dom-construct"), "dojoDomConstruct");
/// assert_eq!(to_module_alias("new"), "new_");
/// ```
pub fn to_module_alias(module_path: &str) -> String {
    let mut result = String::with_capacity(module_path.len());
    let mut next_upper = false;
    for ch in module_path.chars() {
        let valid = if result.is_empty() {
            is_identifier_start(ch)
        } else {
            is_identifier_part(ch)
        };
        if !valid {
            next_upper = true;
            continue;
        }
        if next_upper {
            result.extend(ch.to_uppercase());
        } else {
            result.push(ch);
        }
        next_upper = false;
    }
    if JS_KEYWORDS.contains(&result.as_str()) {
        result.push('_');
    }
    result
}
