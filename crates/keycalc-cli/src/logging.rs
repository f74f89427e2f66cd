//! Log subscriber setup
//!
//! Logs always go to stderr so stdout carries nothing but results.

use crate::config::{CliConfig, Verbosity};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity-derived filter
pub const LOG_ENV: &str = "KEYCALC_LOG";

/// Filter from `KEYCALC_LOG`, falling back to the verbosity level
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Installs the global subscriber; JSON output gets JSON log lines
///
/// A second call is ignored.
pub fn init(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.verbosity))
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.format.is_json() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}
