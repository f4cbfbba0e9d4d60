//! Resource identity: a scope plus a name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visibility scope of a script resource.
///
/// The scope is part of the identity: `SHARED/foo` and `PORTAL/foo` are two
/// different resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceScope {
    Shared,
    Portal,
    Portlet,
    Group,
}

impl ResourceScope {
    /// Every scope, in the order used when listing resources across scopes.
    pub const ALL: [ResourceScope; 4] = [
        ResourceScope::Shared,
        ResourceScope::Portal,
        ResourceScope::Portlet,
        ResourceScope::Group,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceScope::Shared => "SHARED",
            ResourceScope::Portal => "PORTAL",
            ResourceScope::Portlet => "PORTLET",
            ResourceScope::Group => "GROUP",
        }
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceScope {
    type Err = ResourceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceScope::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ResourceIdError::UnknownScope(s.to_string()))
    }
}

/// Errors raised while parsing a [`ResourceId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceIdError {
    #[error("unknown resource scope '{0}'")]
    UnknownScope(String),

    #[error("resource name cannot be empty")]
    EmptyName,
}

/// Identity of a script resource.
///
/// Equality and hashing are by value. The display form `SCOPE/name` is the
/// module name handed to the AMD loader on the client, and also its serde form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ResourceId {
    scope: ResourceScope,
    name: String,
}

impl ResourceId {
    pub fn new(scope: ResourceScope, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }

    /// Shorthand for a resource in the [`ResourceScope::Shared`] scope.
    pub fn shared(name: impl Into<String>) -> Self {
        Self::new(ResourceScope::Shared, name)
    }

    /// Shorthand for a load group id.
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(ResourceScope::Group, name)
    }

    pub fn scope(&self) -> ResourceScope {
        self.scope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last `/`-separated segment of the name, used as the default alias.
    pub fn last_segment(&self) -> &str {
        match self.name.rfind('/') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.name)
    }
}

impl FromStr for ResourceId {
    type Err = ResourceIdError;

    /// Parses `SCOPE/name`, or a bare `name` in the shared scope.
    ///
    /// ```
    /// use scriptgraph::{ResourceId, ResourceScope};
    ///
    /// let id: ResourceId = "PORTAL/navigation".parse().unwrap();
    /// assert_eq!(id.scope(), ResourceScope::Portal);
    /// assert_eq!(id.name(), "navigation");
    ///
    /// let shared: ResourceId = "jquery".parse().unwrap();
    /// assert_eq!(shared, ResourceId::shared("jquery"));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scope, name) = match s.split_once('/') {
            Some((prefix, rest)) => match prefix.parse::<ResourceScope>() {
                Ok(scope) => (scope, rest),
                // A name with slashes but no scope prefix, e.g. "dojo/dom".
                Err(_) => (ResourceScope::Shared, s),
            },
            None => (ResourceScope::Shared, s),
        };

        if name.is_empty() {
            return Err(ResourceIdError::EmptyName);
        }

        Ok(Self::new(scope, name))
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ResourceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_parse() {
        for scope in ResourceScope::ALL {
            let id = ResourceId::new(scope, "foo/bar");
            assert_eq!(id.to_string().parse::<ResourceId>().unwrap(), id);
        }
    }

    #[test]
    fn unscoped_names_with_slashes_are_shared() {
        let id: ResourceId = "dojo/dom".parse().unwrap();
        assert_eq!(id, ResourceId::shared("dojo/dom"));
        assert_eq!(id.last_segment(), "dom");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert_eq!("".parse::<ResourceId>(), Err(ResourceIdError::EmptyName));
        assert_eq!("PORTLET/".parse::<ResourceId>(), Err(ResourceIdError::EmptyName));
    }

    #[test]
    fn serializes_as_display_string() {
        let id = ResourceId::new(ResourceScope::Portal, "nav");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"PORTAL/nav\"");
        let back: ResourceId = serde_json::from_str("\"PORTAL/nav\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn scopes_parse_case_insensitively() {
        assert_eq!("portlet".parse::<ResourceScope>(), Ok(ResourceScope::Portlet));
        assert!(matches!(
            "nowhere".parse::<ResourceScope>(),
            Err(ResourceIdError::UnknownScope(_))
        ));
    }
}
