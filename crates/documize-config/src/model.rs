//! Typed runtime configuration models.
//!
//! # Design
//! - Pure data carriers; resolution of salt and ports happens in the startup
//!   stages of the application crate.
//! - Secrets are never serialised.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::defaults::{PRODUCT_EDITION, PRODUCT_MAJOR, PRODUCT_MINOR, PRODUCT_PATCH};
use crate::error::ConfigError;

/// Operating mode of the site.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SiteMode {
    /// Normal operation backed by a migrated database.
    #[default]
    Online,
    /// Maintenance mode; database state is not inspected.
    Offline,
    /// First-run mode awaiting database provisioning.
    Setup,
}

impl SiteMode {
    #[must_use]
    /// Render the mode as its lowercase string representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Setup => "setup",
        }
    }

    #[must_use]
    /// Whether startup should inspect and migrate the database schema.
    pub const fn checks_database(self) -> bool {
        !matches!(self, Self::Offline)
    }
}

impl FromStr for SiteMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Numeric codes are the legacy DOCUMIZEOFFLINE values.
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "online" => Ok(Self::Online),
            "1" | "offline" => Ok(Self::Offline),
            "2" | "setup" => Ok(Self::Setup),
            _ => Err(ConfigError::InvalidSiteMode {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SiteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TLS certificate material supplied by the operator.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TlsConfig {
    /// Path to the PEM certificate chain.
    pub cert_file: Option<PathBuf>,
    /// Path to the PEM private key.
    pub key_file: Option<PathBuf>,
}

impl TlsConfig {
    #[must_use]
    /// Whether any TLS material was configured.
    pub const fn is_configured(&self) -> bool {
        self.cert_file.is_some() || self.key_file.is_some()
    }

    #[must_use]
    /// Whether only one of certificate or key was configured.
    pub const fn is_partial(&self) -> bool {
        self.cert_file.is_some() != self.key_file.is_some()
    }
}

/// Licence attached to the running edition.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct License {
    /// Edition the licence was issued for.
    pub edition: String,
    /// Number of seats covered.
    pub seats: u32,
    /// Whether the licence is valid.
    pub valid: bool,
    /// Whether the licence is a trial.
    pub trial: bool,
}

/// Product and edition details reported at boot.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductInfo {
    /// Major version component.
    pub major: String,
    /// Minor version component.
    pub minor: String,
    /// Patch version component.
    pub patch: String,
    /// Dotted version string.
    pub version: String,
    /// Edition name.
    pub edition: String,
    /// Display title for the edition.
    pub title: String,
    /// Licence details.
    pub license: License,
}

impl ProductInfo {
    #[must_use]
    /// Product details for the community edition.
    pub fn community() -> Self {
        Self {
            major: PRODUCT_MAJOR.to_string(),
            minor: PRODUCT_MINOR.to_string(),
            patch: PRODUCT_PATCH.to_string(),
            version: format!("{PRODUCT_MAJOR}.{PRODUCT_MINOR}.{PRODUCT_PATCH}"),
            edition: PRODUCT_EDITION.to_string(),
            title: format!("{PRODUCT_EDITION} Edition"),
            license: License {
                edition: PRODUCT_EDITION.to_string(),
                seats: 1,
                valid: true,
                trial: false,
            },
        }
    }
}

/// Process-lifetime configuration threaded through startup.
///
/// `salt` and `http_port` start as whatever the operator supplied and are
/// filled in by the startup stages before the configuration is handed to the
/// serving layer.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    /// Database connection string; normalised during startup.
    #[serde(skip)]
    pub db_conn: String,
    /// TLS certificate material.
    pub tls: TlsConfig,
    /// HTTP listener port.
    pub http_port: Option<u16>,
    /// Plain HTTP port that redirects to the TLS listener.
    pub force_https_port: Option<u16>,
    /// Salt used by downstream cryptographic operations.
    #[serde(skip)]
    pub salt: Option<String>,
    /// Operating mode of the site.
    pub site_mode: SiteMode,
    /// Product and edition details.
    pub product: ProductInfo,
}

impl RuntimeConfig {
    #[must_use]
    /// Build a configuration with only a connection string and defaults elsewhere.
    pub fn new(db_conn: impl Into<String>) -> Self {
        Self {
            db_conn: db_conn.into(),
            tls: TlsConfig::default(),
            http_port: None,
            force_https_port: None,
            salt: None,
            site_mode: SiteMode::default(),
            product: ProductInfo::community(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_mode_parses_names_and_legacy_codes() {
        assert_eq!("online".parse::<SiteMode>().ok(), Some(SiteMode::Online));
        assert_eq!("".parse::<SiteMode>().ok(), Some(SiteMode::Online));
        assert_eq!("1".parse::<SiteMode>().ok(), Some(SiteMode::Offline));
        assert_eq!("OFFLINE".parse::<SiteMode>().ok(), Some(SiteMode::Offline));
        assert_eq!("2".parse::<SiteMode>().ok(), Some(SiteMode::Setup));
        assert!(matches!(
            "3".parse::<SiteMode>(),
            Err(ConfigError::InvalidSiteMode { .. })
        ));
    }

    #[test]
    fn only_offline_skips_database_checks() {
        assert!(SiteMode::Online.checks_database());
        assert!(SiteMode::Setup.checks_database());
        assert!(!SiteMode::Offline.checks_database());
    }

    #[test]
    fn tls_config_reports_partial_material() {
        let none = TlsConfig::default();
        assert!(!none.is_configured());
        assert!(!none.is_partial());

        let cert_only = TlsConfig {
            cert_file: Some(PathBuf::from("/etc/documize/cert.pem")),
            key_file: None,
        };
        assert!(cert_only.is_configured());
        assert!(cert_only.is_partial());

        let both = TlsConfig {
            cert_file: Some(PathBuf::from("/etc/documize/cert.pem")),
            key_file: Some(PathBuf::from("/etc/documize/key.pem")),
        };
        assert!(both.is_configured());
        assert!(!both.is_partial());
    }

    #[test]
    fn community_product_info_is_single_seat() {
        let product = ProductInfo::community();
        assert_eq!(product.version, "1.50.0");
        assert_eq!(product.title, "Community Edition");
        assert_eq!(product.license.seats, 1);
        assert!(product.license.valid);
        assert!(!product.license.trial);
    }

    #[test]
    fn runtime_config_never_serialises_secrets() -> Result<(), serde_json::Error> {
        let mut config = RuntimeConfig::new("root:secret@tcp(localhost:3306)/documize");
        config.salt = Some("sekrit".to_string());
        let rendered = serde_json::to_string(&config)?;
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("sekrit"));
        assert!(rendered.contains("\"site_mode\":\"online\""));
        Ok(())
    }
}
