//! Logging initialization with environment-based formatters
//!
//! - Production: structured JSON lines for log aggregation
//! - Anything else: colourful, human-readable output

use crate::config::get_environment;
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber for `environment`.
///
/// Fails if a subscriber is already installed.
pub fn try_init_logging(environment: &str) -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter());

    if is_production(environment) {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    }
}

/// Initialize logging for the current `ENVIRONMENT`.
///
/// A second call is a no-op.
pub fn init_logging() {
    let _ = try_init_logging(&get_environment());
}
