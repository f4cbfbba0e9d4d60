//! Command implementations.
//!
//! Each command module exposes an `execute` taking its parsed arguments and
//! the loaded [`ServiceSettings`].

pub mod check;
pub mod config;
pub mod dot;
pub mod resolve;
pub mod script;
pub mod utils;

use scriptgraph_config::ServiceSettings;

use crate::cli::Command;
use crate::error::Result;

pub use check::execute as check_execute;
pub use config::execute as config_execute;
pub use dot::execute as dot_execute;
pub use resolve::execute as resolve_execute;
pub use script::execute as script_execute;

/// Run `command`.
pub fn execute(command: Command, settings: ServiceSettings) -> Result<()> {
    match command {
        Command::Check(args) => check_execute(args, settings),
        Command::Resolve(args) => resolve_execute(args, settings),
        Command::Script(args) => script_execute(args, settings),
        Command::Config(args) => config_execute(args, settings),
        Command::Dot(args) => dot_execute(args, settings),
    }
}
