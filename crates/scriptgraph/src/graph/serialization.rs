//! Export methods for ScriptGraph.

use std::sync::Arc;

use super::ScriptGraph;
use crate::{GraphStatistics, ScriptGroup, ScriptResource};

/// Helper to escape labels for DOT format.
fn escape_label(label: &str) -> String {
    label.replace('"', "\\\"")
}

impl ScriptGraph {
    /// Export the graph as DOT for visualization.
    ///
    /// ON_LOAD resources are drawn dashed; groups become clusters.
    pub fn to_dot(&self) -> String {
        let mut output = String::from("digraph ScriptGraph {\n");

        for group in self.inner.groups.values() {
            output.push_str(&format!(
                "    subgraph \"cluster_{}\" {{\n        label = \"{}\";\n",
                escape_label(group.name()),
                escape_label(&group.id().to_string())
            ));
            for member in group.scripts() {
                output.push_str(&format!("        \"{}\";\n", escape_label(&member.to_string())));
            }
            output.push_str("    }\n");
        }

        for resource in self.inner.resources.values() {
            output.push_str(&format!("    \"{}\"", escape_label(&resource.id().to_string())));
            if resource.fetch_mode() == crate::FetchMode::OnLoad {
                output.push_str(" [style=dashed]");
            }
            output.push_str(";\n");
        }

        for resource in self.inner.resources.values() {
            for target in resource.dependencies() {
                output.push_str(&format!(
                    "    \"{}\" -> \"{}\";\n",
                    escape_label(&resource.id().to_string()),
                    escape_label(&target.to_string())
                ));
            }
        }

        output.push_str("}\n");
        output
    }

    /// Export resources, groups and statistics as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(serde::Serialize)]
        struct GraphJson {
            resources: Vec<Arc<ScriptResource>>,
            groups: Vec<Arc<ScriptGroup>>,
            statistics: GraphStatistics,
        }

        let graph_json = GraphJson {
            resources: self.all_resources(),
            groups: self.groups(),
            statistics: self.statistics(),
        };
        serde_json::to_string_pretty(&graph_json)
    }
}
