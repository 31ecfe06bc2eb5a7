//! Error types for configuration handling.

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Site mode value was not recognised.
    #[error("invalid site mode")]
    InvalidSiteMode {
        /// Site mode payload provided by the operator.
        value: String,
    },
    /// Field contained an unusable value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Flag or environment name that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when it is safe to echo.
        value: Option<String>,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
