//! Terminal output helpers.
//!
//! Status messages go to stderr so that command results on stdout stay
//! pipeable.
//!
//! ```no_run
//! use scriptgraph_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("2 descriptor file(s) registered");
//! ui::error("cycle detected");
//! ```

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{error, info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(true);

/// Whether colors suit the environment.
///
/// `NO_COLOR` disables and `FORCE_COLOR` forces colors; otherwise stderr
/// must be a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide once whether status messages are colored.
pub fn init_colors(no_color: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}
