use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a script resource reaches the browser.
///
/// A resource and every resource in its dependency closure always share the
/// same fetch mode; the graph rejects edges that would mix them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchMode {
    /// Delivered eagerly with the page.
    Immediate,
    /// Fetched lazily as an AMD module.
    OnLoad,
}

impl FetchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchMode::Immediate => "IMMEDIATE",
            FetchMode::OnLoad => "ON_LOAD",
        }
    }
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "immediate" => Ok(FetchMode::Immediate),
            "on-load" | "onload" => Ok(FetchMode::OnLoad),
            other => Err(format!("unknown fetch mode '{other}'")),
        }
    }
}
