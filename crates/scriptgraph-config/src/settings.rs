//! Service settings: URL layout of served scripts and logging.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const SETTINGS_FILE: &str = "scriptgraph.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Context path of the portal serving the scripts.
    pub portal_context: String,
    /// Path segment of the script handler.
    pub handler: String,
    /// Version segment of script URLs; changes bust browser caches.
    pub version: String,
    /// Development mode: serve unminified, unmerged scripts.
    pub development: bool,
    pub log_level: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            portal_context: "/portal".to_string(),
            handler: "scripts".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            development: false,
            log_level: None,
        }
    }
}

impl ServiceSettings {
    /// Load settings.
    /// Priority: environment variables > settings file > defaults
    ///
    /// Without an explicit path, `scriptgraph.toml` in the working directory
    /// is used when present.
    pub fn load(settings_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let settings_file = settings_path.map(Path::to_path_buf).or_else(|| {
            let default_path = Path::new(SETTINGS_FILE);
            default_path.exists().then(|| default_path.to_path_buf())
        });
        if let Some(path) = settings_file {
            if !path.exists() {
                return Err(ConfigError::NotFound(path));
            }
            figment = figment.merge(Toml::file(path));
        }

        // SCRIPTGRAPH_PORTAL_CONTEXT, SCRIPTGRAPH_DEVELOPMENT, ...
        figment = figment.merge(Env::prefixed("SCRIPTGRAPH_"));

        let settings: Self = figment
            .extract()
            .map_err(|e| ConfigError::invalid("settings", e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !self.portal_context.starts_with('/') {
            return Err(ConfigError::InvalidPath {
                name: "portal_context",
                path: self.portal_context.clone(),
                reason: "must start with '/'",
            });
        }
        if self.handler.is_empty() || self.handler.contains('/') {
            return Err(ConfigError::invalid(
                "handler",
                "expected a single, non-empty path segment",
            ));
        }
        Ok(())
    }
}
