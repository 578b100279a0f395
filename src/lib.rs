//! Ephemeral Poll System
//!
//! One question, a fixed set of options, live tallies in memory.

pub mod config;
pub mod errors;
pub mod form;
pub mod presentation;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use errors::{Error, Result};
pub use form::PollDraft;
pub use store::PollStore;
pub use types::{Color, Poll, ResultRow};

use config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the poll system with logging settings from the environment
pub fn init() -> Result<()> {
    init_with(&LoggingConfig::from_env())
}

/// Initialize logging from an explicit configuration
///
/// `RUST_LOG` wins when set; otherwise `config.level` is the filter.
/// `config.format` picks `json`, `pretty` or the compact default. Fails
/// with [`Error::Internal`] when a global subscriber is already installed.
pub fn init_with(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| Error::config(format!("Invalid LOG_LEVEL {:?}: {e}", config.level)))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        "pretty" => builder.pretty().try_init(),
        _ => builder.compact().try_init(),
    };
    installed.map_err(|e| Error::internal(format!("Logging already initialized: {e}")))?;

    tracing::info!(format = %config.format, "🗳️  Poll system v{} initialized", VERSION);
    Ok(())
}
