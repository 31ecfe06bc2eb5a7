//! Listener port defaults derived from TLS configuration.

use documize_config::TlsConfig;
use documize_config::defaults::{DEFAULT_HTTP_PORT, DEFAULT_HTTPS_PORT};
use tracing::warn;

/// Resolve the HTTP listener port.
///
/// An explicit port always wins. Otherwise the default is 80 without TLS
/// material and 443 when either a certificate or a key is configured.
#[must_use]
pub fn select_http_port(tls: &TlsConfig, explicit: Option<u16>) -> u16 {
    if tls.is_partial() {
        warn!(
            cert = tls.cert_file.is_some(),
            key = tls.key_file.is_some(),
            "TLS configuration is incomplete; both certificate and key are required"
        );
    }

    explicit.unwrap_or(if tls.is_configured() {
        DEFAULT_HTTPS_PORT
    } else {
        DEFAULT_HTTP_PORT
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn tls(cert: bool, key: bool) -> TlsConfig {
        TlsConfig {
            cert_file: cert.then(|| PathBuf::from("/etc/documize/cert.pem")),
            key_file: key.then(|| PathBuf::from("/etc/documize/key.pem")),
        }
    }

    #[test]
    fn plain_http_defaults_to_80() {
        assert_eq!(select_http_port(&tls(false, false), None), 80);
    }

    #[test]
    fn tls_material_defaults_to_443() {
        assert_eq!(select_http_port(&tls(true, true), None), 443);
        assert_eq!(select_http_port(&tls(true, false), None), 443);
        assert_eq!(select_http_port(&tls(false, true), None), 443);
    }

    #[test]
    fn explicit_port_is_never_overridden() {
        assert_eq!(select_http_port(&tls(false, false), Some(5001)), 5001);
        assert_eq!(select_http_port(&tls(true, true), Some(5001)), 5001);
    }
}
