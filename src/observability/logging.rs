//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem once
//! - Configure log level from config and environment

use tracing_subscriber::EnvFilter;

/// Initialize the `tracing` subscriber.
///
/// The configured level is the default; `RUST_LOG` overrides it. Calling
/// this more than once is harmless, later calls are no-ops.
pub fn init(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
