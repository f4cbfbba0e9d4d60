//! `scriptgraph script`: text served for a resource or load group.

use std::io::{self, Write};

use scriptgraph_config::ServiceSettings;

use crate::cli::ScriptArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};

pub fn execute(args: ScriptArgs, settings: ServiceSettings) -> Result<()> {
    let service = utils::load_service(&args.input, settings)?;
    let text = service
        .script(&args.id, args.locale.as_deref())?
        .ok_or(CliError::NotRegistered(args.id))?;

    let mut out = io::stdout().lock();
    writeln!(out, "{text}")?;
    Ok(())
}
