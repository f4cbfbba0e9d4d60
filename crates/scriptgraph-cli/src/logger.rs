//! Logging setup for the scriptgraph CLI.
//!
//! Library crates only emit `tracing` events. The subscriber installed here
//! decides what reaches the terminal.
//!
//! # Example
//!
//! ```rust,no_run
//! use scriptgraph_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false, None);
//! info!("Registering descriptors");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = [
    "scriptgraph",
    "scriptgraph_config",
    "scriptgraph_service",
    "scriptgraph_cli",
];

/// Filter directives giving every scriptgraph crate the same `level`.
pub fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Pick the filter for the given flags.
///
/// Precedence:
/// 1. `--verbose`: DEBUG for scriptgraph crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. `log_level` from the settings
/// 5. INFO for scriptgraph crates
pub fn build_filter(verbose: bool, quiet: bool, settings_level: Option<&str>) -> EnvFilter {
    if verbose {
        EnvFilter::new(directives("debug"))
    } else if quiet {
        EnvFilter::new(directives("error"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(directives(settings_level.unwrap_or("info")))
        })
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, settings_level: Option<&str>) {
    let filter = build_filter(verbose, quiet, settings_level);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is global, so these only check filter construction.

    #[test]
    fn directives_cover_every_crate() {
        let d = directives("debug");
        assert_eq!(
            d,
            "scriptgraph=debug,scriptgraph_config=debug,scriptgraph_service=debug,scriptgraph_cli=debug"
        );
    }

    #[test]
    fn verbose_wins_over_quiet() {
        let filter = build_filter(true, true, Some("warn"));
        assert!(filter.to_string().contains("scriptgraph=debug"));
    }

    #[test]
    fn quiet_filter() {
        let filter = build_filter(false, true, None);
        assert!(filter.to_string().contains("scriptgraph_cli=error"));
    }
}
