//! `scriptgraph config`: require.js configuration of the registered graph.

use std::io::{self, Write};

use scriptgraph_config::ServiceSettings;

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::error::Result;

/// URLs point at minified scripts unless the settings enable development mode.
pub fn execute(args: ConfigArgs, settings: ServiceSettings) -> Result<()> {
    let service = utils::load_service(&args.input, settings)?;
    let config = service.js_config(args.locale.as_deref());

    let mut out = io::stdout().lock();
    writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
    Ok(())
}
