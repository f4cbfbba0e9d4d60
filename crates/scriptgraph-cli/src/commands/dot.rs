//! `scriptgraph dot`: graph export.

use std::io::{self, Write};

use scriptgraph_config::ServiceSettings;

use crate::cli::{DotArgs, ExportFormat};
use crate::commands::utils;
use crate::error::Result;

pub fn execute(args: DotArgs, settings: ServiceSettings) -> Result<()> {
    let service = utils::load_service(&args.input, settings)?;
    let graph = service.graph();

    let text = match args.format {
        ExportFormat::Dot => graph.to_dot(),
        ExportFormat::Json => graph.to_json()?,
    };

    let mut out = io::stdout().lock();
    writeln!(out, "{text}")?;
    Ok(())
}
