//! Error handling for the poll system

/// Result type alias for the poll system
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the poll system
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Rejected poll input (empty question, no options, limits exceeded)
    #[error("Validation failed: {field}")]
    Validation { field: String },

    /// No poll is currently active
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Vote for a label the active poll does not offer
    #[error("Invalid option: {option}")]
    InvalidOption { option: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new invalid option error
    pub fn invalid_option(option: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience macros for creating specific error types
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::Error::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::validation(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! poll_error {
    ($msg:expr) => {
        $crate::Error::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::internal(format!($fmt, $($arg)*))
    };
}
