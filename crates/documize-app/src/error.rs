//! # Design
//!
//! - Centralize application-level errors for the startup sequence.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Stages log the failure once; callers only propagate.

use std::io;

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Flag or environment configuration was unusable.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: documize_config::ConfigError,
    },
    /// The database connection string could not be interpreted.
    #[error("invalid database connection string")]
    ConnectionString {
        /// Source data-layer error.
        source: documize_data::DataError,
    },
    /// The database could not be opened or reached.
    #[error("database connectivity failed")]
    Connectivity {
        /// Operation identifier.
        operation: &'static str,
        /// Source data-layer error.
        source: documize_data::DataError,
    },
    /// Schema inspection or migration failed.
    #[error("database migration failed")]
    Migration {
        /// Operation identifier.
        operation: &'static str,
        /// Source data-layer error.
        source: documize_data::DataError,
    },
    /// The secure random source failed.
    #[error("secure random source failed")]
    Entropy {
        /// Error reported by the random source.
        detail: String,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: documize_telemetry::TelemetryError,
    },
    /// IO operations failed.
    #[error("io operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        source: io::Error,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: documize_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: documize_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) fn open(source: documize_data::DataError) -> Self {
        match source {
            source @ documize_data::DataError::InvalidConnectionString { .. } => {
                Self::ConnectionString { source }
            }
            source => Self::Connectivity {
                operation: "database.open",
                source,
            },
        }
    }
}
