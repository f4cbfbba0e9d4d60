//! miette rendering of CLI errors.

use ::miette::{Report, miette};
use scriptgraph::GraphError;
use scriptgraph_service::ServiceError;

use crate::error::CliError;

/// Turn a [`CliError`] into a report with a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    let help = hint(err.root());
    match help {
        Some(help) => miette!(help = help, "{}", err),
        None => miette!("{}", err),
    }
}

fn hint(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Service(ServiceError::Graph(GraphError::InvalidResource(_))) => Some(
            "Dependencies must form no cycle and join resources of the same fetch mode",
        ),
        CliError::Service(err) if err.is_duplicate() => {
            Some("Each id, path prefix and static script may be declared by one context only")
        }
        CliError::DescriptorNotFound(_) => {
            Some("Pass a scripts.toml / scripts.json file or a directory containing one")
        }
        CliError::CheckFailed { .. } => Some("Run with --verbose for details"),
        CliError::Unresolved(_) => Some("Register the missing resources or drop the dependencies"),
        _ => None,
    }
}
