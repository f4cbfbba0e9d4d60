use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use scriptgraph::{FetchMode, ResourceId};

use crate::cli::validation::parse_request;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register descriptor files and report every failure
    ///
    /// Each input is registered as its own context, in order. Inputs that
    /// fail are reported and skipped; the command fails if any did.
    Check(CheckArgs),

    /// Print the dependency-ordered resolution of the requested ids
    Resolve(ResolveArgs),

    /// Print the text served for a resource or a GROUP id
    Script(ScriptArgs),

    /// Print the require.js configuration as JSON
    Config(ConfigArgs),

    /// Export the graph as Graphviz DOT or JSON
    Dot(DotArgs),
}

/// Descriptor inputs shared by every command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Descriptor files, or directories containing scripts.toml / scripts.json
    #[arg(required = true, value_name = "PATH")]
    pub inputs: Vec<PathBuf>,

    /// Context path to register a single input under (default: /<name>)
    #[arg(long, value_name = "PATH")]
    pub context: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Fail when a dependency points at an unregistered id
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Requested id as SCOPE/name, optionally with a fetch mode: SHARED/app:on-load
    #[arg(long = "id", required = true, value_name = "ID", value_parser = parse_request)]
    pub ids: Vec<(ResourceId, Option<FetchMode>)>,

    /// Print the URL of each resolved resource
    #[arg(long)]
    pub urls: bool,

    /// Locale used for URLs
    #[arg(long, requires = "urls")]
    pub locale: Option<String>,
}

#[derive(Args, Debug)]
pub struct ScriptArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Resource or GROUP id
    #[arg(long, value_name = "ID")]
    pub id: ResourceId,

    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long)]
    pub locale: Option<String>,
}

#[derive(Args, Debug)]
pub struct DotArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(short, long, value_enum, default_value = "dot")]
    pub format: ExportFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dot,
    Json,
}
