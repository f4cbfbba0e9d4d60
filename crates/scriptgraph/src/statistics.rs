//! Summary counts over a graph snapshot.

use serde::Serialize;

use crate::{FetchMode, ResourceId, ResourceScope};

/// Snapshot statistics, used by the CLI `check` report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    /// Total number of resources
    pub resource_count: usize,
    /// Resources per scope, in [`ResourceScope::ALL`] order
    pub by_scope: Vec<(ResourceScope, usize)>,
    pub immediate_count: usize,
    pub on_load_count: usize,
    pub group_count: usize,
    /// Number of declared dependency edges
    pub edge_count: usize,
    /// Dependency targets no context has registered (yet)
    pub unresolved: Vec<ResourceId>,
}

impl GraphStatistics {
    pub fn count_for(&self, scope: ResourceScope) -> usize {
        self.by_scope
            .iter()
            .find(|(s, _)| *s == scope)
            .map_or(0, |(_, count)| *count)
    }

    pub fn count_for_mode(&self, mode: FetchMode) -> usize {
        match mode {
            FetchMode::Immediate => self.immediate_count,
            FetchMode::OnLoad => self.on_load_count,
        }
    }

    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }
}
