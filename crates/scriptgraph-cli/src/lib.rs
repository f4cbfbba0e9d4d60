//! scriptgraph CLI - check, resolve and export script resource descriptors.
//!
//! Every command takes one or more descriptor inputs. An input is a
//! `scripts.toml` / `scripts.json` file, or a directory holding one. Each
//! input is registered as its own context, in command-line order, into a
//! single [`ScriptService`](scriptgraph_service::ScriptService).
//!
//! # Modules
//!
//! - [`cli`] - argument parsing with clap
//! - [`commands`] - one module per subcommand
//! - [`error`] - `CliError` and its miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - colored status messages
//!
//! # Example
//!
//! ```rust,no_run
//! use scriptgraph_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false, None);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
