//! Command-line interface definition.
//!
//! - `scriptgraph check` - register descriptors and report problems
//! - `scriptgraph resolve` - ordered resolution of requested ids
//! - `scriptgraph script` - text served for a resource or load group
//! - `scriptgraph config` - require.js configuration
//! - `scriptgraph dot` - graph export

mod commands;
mod validation;

use std::path::PathBuf;

use clap::Parser;

pub use commands::{
    CheckArgs, Command, ConfigArgs, DotArgs, ExportFormat, InputArgs, ResolveArgs, ScriptArgs,
};
pub use validation::parse_request;

/// scriptgraph - dependency graph of browser script resources
#[derive(Parser, Debug)]
#[command(
    name = "scriptgraph",
    version,
    about = "Check, resolve and export script resource descriptors",
    long_about = "scriptgraph loads scripts.toml / scripts.json descriptor files, registers each\n\
                  one as a deployed context and answers questions about the resulting graph:\n\
                  dependency order, served script text, require.js configuration."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Service settings file (defaults to ./scriptgraph.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}
