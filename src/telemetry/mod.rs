//! Telemetry setup for reportrag
//!
//! The library only emits `tracing` events; binaries decide where they go.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "REPORTRAG_LOG";

/// Build the filter: `REPORTRAG_LOG` when set, otherwise `default_level`
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install a stderr fmt subscriber.
///
/// Returns false when a global subscriber was already installed.
pub fn init_tracing(default_level: &str, color: bool) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_level))
        .with_target(false)
        .with_ansi(color)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
