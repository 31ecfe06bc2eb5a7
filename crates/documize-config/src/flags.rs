//! Command-line flags with environment fallbacks.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::defaults::{
    ENV_CERT, ENV_DB, ENV_FORCE_SSL_PORT, ENV_KEY, ENV_LOG_FORMAT, ENV_PORT, ENV_SALT, ENV_SITE_MODE,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{ProductInfo, RuntimeConfig, SiteMode, TlsConfig};

/// Operator-supplied startup flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "documize", version, about = "Documize Community server")]
pub struct Flags {
    /// Database connection string, e.g. `user:pass@tcp(host:3306)/documize`.
    #[arg(long = "db", env = ENV_DB, value_name = "DSN", hide_env_values = true)]
    pub db_conn: String,
    /// TLS certificate file.
    #[arg(long = "cert", env = ENV_CERT, value_name = "PATH")]
    pub ssl_cert_file: Option<PathBuf>,
    /// TLS private key file.
    #[arg(long = "key", env = ENV_KEY, value_name = "PATH")]
    pub ssl_key_file: Option<PathBuf>,
    /// HTTP listener port; defaults to 80, or 443 when TLS material is set.
    #[arg(long = "port", env = ENV_PORT, value_parser = clap::value_parser!(u16).range(1..))]
    pub http_port: Option<u16>,
    /// Plain HTTP port that redirects to the TLS listener.
    #[arg(
        long = "forcesslport",
        env = ENV_FORCE_SSL_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub force_https_port: Option<u16>,
    /// Salt for cryptographic operations; generated when absent.
    #[arg(long = "salt", env = ENV_SALT, hide_env_values = true)]
    pub salt: Option<String>,
    /// Site mode: `online`, `offline`, or `setup`.
    #[arg(long = "offline", env = ENV_SITE_MODE, default_value = "online")]
    pub site_mode: SiteMode,
    /// Log output format.
    #[arg(long = "log-format", env = ENV_LOG_FORMAT, value_enum)]
    pub log_format: Option<LogFormatFlag>,
}

/// Log format selection exposed on the flag surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatFlag {
    /// Structured JSON lines.
    Json,
    /// Human-readable output.
    Pretty,
}

impl Flags {
    /// Convert the parsed flags into the mutable startup configuration.
    ///
    /// Blank values are treated as absent so an exported-but-empty environment
    /// variable behaves like an unset one.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection string is blank.
    pub fn into_runtime_config(self) -> ConfigResult<RuntimeConfig> {
        let db_conn = self.db_conn.trim().to_string();
        if db_conn.is_empty() {
            return Err(ConfigError::InvalidField {
                field: "db",
                reason: "empty",
                value: None,
            });
        }

        Ok(RuntimeConfig {
            db_conn,
            tls: TlsConfig {
                cert_file: self.ssl_cert_file.filter(|path| !path.as_os_str().is_empty()),
                key_file: self.ssl_key_file.filter(|path| !path.as_os_str().is_empty()),
            },
            http_port: self.http_port,
            force_https_port: self.force_https_port,
            salt: self.salt.filter(|salt| !salt.trim().is_empty()),
            site_mode: self.site_mode,
            product: ProductInfo::community(),
        })
    }
}
