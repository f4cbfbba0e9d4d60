//! `scriptgraph resolve`: dependency-ordered resolution of requested ids.

use std::io::{self, Write};

use scriptgraph_config::ServiceSettings;

use crate::cli::ResolveArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Print one `MODE<TAB>ID[<TAB>URL]` line per resolved resource,
/// dependencies first.
pub fn execute(args: ResolveArgs, settings: ServiceSettings) -> Result<()> {
    let minified = !settings.development;
    let service = utils::load_service(&args.input, settings)?;

    let resolution = service.resolve_ids(args.ids.iter().cloned());
    if resolution.is_empty() {
        ui::warning("Nothing resolved: ids unknown or requested with another fetch mode");
        return Ok(());
    }

    let mut out = io::stdout().lock();
    for (resource, mode) in &resolution {
        let id = resource.id();
        if args.urls {
            let url = service
                .generate_url(id, minified, args.locale.as_deref())
                .unwrap_or_default();
            writeln!(out, "{mode}\t{id}\t{url}")?;
        } else {
            writeln!(out, "{mode}\t{id}")?;
        }
    }
    Ok(())
}
