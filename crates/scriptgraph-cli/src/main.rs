//! scriptgraph CLI entry point: argument parsing, logging setup and
//! command dispatch.

use clap::Parser;
use miette::Result;
use scriptgraph_cli::{cli, commands, error, logger, ui};
use scriptgraph_config::ServiceSettings;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Settings come first so that their log level can seed the logger.
    let settings = ServiceSettings::load(args.settings.as_deref());
    let level = settings.as_ref().ok().and_then(|s| s.log_level.clone());

    logger::init_logger(args.verbose, args.quiet, args.no_color, level.as_deref());
    ui::init_colors(args.no_color);

    let result = settings
        .map_err(error::CliError::from)
        .and_then(|settings| commands::execute(args.command, settings));

    result.map_err(error::cli_error_to_miette)
}
