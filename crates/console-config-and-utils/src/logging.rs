//! Logging initialization for the client.

use tracing_subscriber::EnvFilter;

/// Initialize the logging system.
///
/// Sets up tracing with the level from the `RUST_LOG` env var or the provided
/// default. Safe to call more than once; later calls are no-ops.
///
/// # Example
///
/// ```ignore
/// init_logging("info");
/// tracing::info!("Client started");
/// ```
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
