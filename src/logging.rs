//! Logging configuration for linked-steps.
//!
//! Step announcements own stdout, so diagnostics always go to stderr.

use std::io;
use tracing_subscriber::EnvFilter;

/// Initializes logging on stderr.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_stderr_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Maps `-v` occurrences to a filter level.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
