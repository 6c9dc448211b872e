//! Logging setup
//!
//! `RUST_LOG` overrides the level; otherwise `info`, or `debug` when verbose.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_line_number(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Debug-level logging captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
