//! `scriptgraph check`: register every input and report what fails.

use scriptgraph::{FetchMode, GraphStatistics, ResourceScope};
use scriptgraph_config::ServiceSettings;

use crate::cli::CheckArgs;
use crate::commands::utils::{self, Input};
use crate::error::{CliError, Result};
use crate::ui;

/// Inputs are registered in order. A failing input is reported and left
/// out, so later inputs are checked against the ones that succeeded.
pub fn execute(args: CheckArgs, settings: ServiceSettings) -> Result<()> {
    if args.input.context.is_some() && args.input.inputs.len() > 1 {
        return Err(CliError::InvalidArgument(
            "--context needs exactly one input".to_string(),
        ));
    }

    let total = args.input.inputs.len();
    let mut located: Vec<Input> = Vec::with_capacity(total);
    let mut failed = 0;

    for path in &args.input.inputs {
        match utils::locate(path, args.input.context.as_deref()) {
            Ok(input) => located.push(input),
            Err(err) => {
                failed += 1;
                ui::error(&err.for_input(path).to_string());
            }
        }
    }

    let service = utils::new_service(settings, &located);
    for input in &located {
        match utils::register(&service, input) {
            Ok(resources) => ui::success(&format!(
                "{} registered as '{}' ({} resource(s))",
                input.descriptor.display(),
                input.context_path,
                resources.descriptors.len()
            )),
            Err(err) => {
                failed += 1;
                ui::error(&err.for_input(&input.descriptor).to_string());
            }
        }
    }

    let stats = service.graph().statistics();
    ui::info(&summary(&stats));
    for id in &stats.unresolved {
        ui::warning(&format!("{id} is a dependency but is not registered"));
    }

    if failed > 0 {
        return Err(CliError::CheckFailed { failed, total });
    }
    if args.strict && stats.has_unresolved() {
        return Err(CliError::Unresolved(stats.unresolved.len()));
    }
    ui::success("All inputs registered");
    Ok(())
}

/// One-line description of a graph.
pub fn summary(stats: &GraphStatistics) -> String {
    let scopes: Vec<String> = ResourceScope::ALL
        .into_iter()
        .filter(|scope| *scope != ResourceScope::Group)
        .map(|scope| format!("{} {scope}", stats.count_for(scope)))
        .collect();
    format!(
        "{} resource(s) ({}; {} {}, {} {}), {} load group(s), {} edge(s)",
        stats.resource_count,
        scopes.join(", "),
        stats.count_for_mode(FetchMode::Immediate),
        FetchMode::Immediate,
        stats.count_for_mode(FetchMode::OnLoad),
        FetchMode::OnLoad,
        stats.group_count,
        stats.edge_count,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_empty_graph() {
        let stats = scriptgraph::ScriptGraph::empty().statistics();
        assert_eq!(
            summary(&stats),
            "0 resource(s) (0 SHARED, 0 PORTAL, 0 PORTLET; 0 IMMEDIATE, 0 ON_LOAD), 0 load group(s), 0 edge(s)"
        );
    }
}
