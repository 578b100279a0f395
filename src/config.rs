//! Configuration management for the poll system
//!
//! Loads limits and logging settings from environment variables with validation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound for displayed percentage decimals
const MAX_PERCENT_PRECISION: usize = 6;

/// Limits applied to poll creation and rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollConfig {
    /// Maximum number of options a poll may carry (after de-duplication)
    pub max_options: usize,

    /// Maximum length, in characters, of the question and of each option label
    pub max_label_len: usize,

    /// Decimal places used when formatting percentages
    pub percent_precision: usize,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_options: 100,
            max_label_len: 500,
            percent_precision: 1,
        }
    }
}

impl PollConfig {
    /// Load poll configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let max_options = env_or("POLL_MAX_OPTIONS", defaults.max_options)?;
        let max_label_len = env_or("POLL_MAX_LABEL_LEN", defaults.max_label_len)?;
        let percent_precision = env_or("POLL_PERCENT_PRECISION", defaults.percent_precision)?;

        let config = Self {
            max_options,
            max_label_len,
            percent_precision,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            max_options: 10,
            max_label_len: 64,
            percent_precision: 1,
        }
    }

    /// Reject limits that would make every poll invalid
    pub fn validate(&self) -> Result<()> {
        if self.max_options == 0 {
            return Err(Error::config("POLL_MAX_OPTIONS must be at least 1"));
        }
        if self.max_label_len == 0 {
            return Err(Error::config("POLL_MAX_LABEL_LEN must be at least 1"));
        }
        if self.percent_precision > MAX_PERCENT_PRECISION {
            return Err(Error::config(format!(
                "POLL_PERCENT_PRECISION must be at most {MAX_PERCENT_PRECISION}"
            )));
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid {name}: {raw:?}"))),
        Err(_) => Ok(default),
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub poll: PollConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load logging settings from `LOG_LEVEL` and `LOG_FORMAT`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or(defaults.level),
            format: std::env::var("LOG_FORMAT").unwrap_or(defaults.format),
        }
    }
}

impl Config {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        let poll = PollConfig::from_env()?;
        let logging = LoggingConfig::from_env();

        Ok(Self { poll, logging })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Result<Self> {
        let poll = PollConfig::for_testing();
        poll.validate()?;

        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        };

        Ok(Self { poll, logging })
    }
}
