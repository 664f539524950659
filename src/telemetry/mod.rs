//! Logging setup
//!
//! Logs go to stderr so they never interleave with answers printed on
//! stdout. `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

use crate::cli::Verbosity;

/// Build the log filter for a verbosity level
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ragshell={},warn", verbosity.log_directive())))
}

/// Install the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbosity: Verbosity) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
