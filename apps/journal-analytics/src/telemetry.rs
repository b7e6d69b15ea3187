//! Tracing subscriber setup.
//!
//! # Configuration
//!
//! - `observability.logging.level`: default filter directive (e.g. `info`,
//!   `journal_analytics=debug`)
//! - `observability.logging.format`: `json`, `pretty` or `compact`
//! - `RUST_LOG`: overrides the configured level when set

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error type for tracing setup.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to install the global subscriber.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the filter: `RUST_LOG` first, then the configured level, then `info`.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so that stdout stays clean for exported data.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr);

    let installed = match config.format.as_str() {
        "json" => builder
            .json()
            .with_current_span(config.include_spans)
            .with_span_list(config.include_spans)
            .try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    };
    installed.map_err(|e| TelemetryError::SubscriberError(e.to_string()))
}
