//! Subscriber bootstrap.
//!
//! Installs a `tracing-subscriber` fmt subscriber so that lines written
//! through [`TracingSink`](crate::sink::TracingSink) reach stdout. The filter is
//! taken from `RUST_LOG` when set, otherwise from the given default directive.

use crate::error::{LogPrintError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// Fails if `default_directive` is not a valid filter or a global subscriber
/// is already installed.
pub fn init_logging(default_directive: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| LogPrintError::ConfigError(format!("invalid log filter '{}': {}", default_directive, e)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LogPrintError::ConfigError(e.to_string()))
}
