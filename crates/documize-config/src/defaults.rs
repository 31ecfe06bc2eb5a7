//! Fixed defaults and environment variable names for the flag surface.
//!
//! # Design
//! - Keep operator-facing names in one place so log instructions and flag
//!   definitions cannot drift apart.

/// Environment variable holding the database connection string.
pub const ENV_DB: &str = "DOCUMIZEDB";
/// Environment variable holding the TLS certificate path.
pub const ENV_CERT: &str = "DOCUMIZECERT";
/// Environment variable holding the TLS private key path.
pub const ENV_KEY: &str = "DOCUMIZEKEY";
/// Environment variable holding the HTTP listener port.
pub const ENV_PORT: &str = "DOCUMIZEPORT";
/// Environment variable holding the HTTP port redirected to HTTPS.
pub const ENV_FORCE_SSL_PORT: &str = "DOCUMIZEFORCESSLPORT";
/// Environment variable holding the persisted salt.
pub const ENV_SALT: &str = "DOCUMIZESALT";
/// Environment variable holding the site mode.
pub const ENV_SITE_MODE: &str = "DOCUMIZEOFFLINE";
/// Environment variable selecting the log output format.
pub const ENV_LOG_FORMAT: &str = "DOCUMIZELOGFORMAT";

/// Default listener port when no TLS material is configured.
pub const DEFAULT_HTTP_PORT: u16 = 80;
/// Default listener port when TLS material is configured.
pub const DEFAULT_HTTPS_PORT: u16 = 443;

pub(crate) const PRODUCT_MAJOR: &str = "1";
pub(crate) const PRODUCT_MINOR: &str = "50";
pub(crate) const PRODUCT_PATCH: &str = "0";
pub(crate) const PRODUCT_EDITION: &str = "Community";
