//! Disposable `MySQL` instances for integration tests.

use anyhow::{Context, Result};
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

use crate::fixtures::docker_available;

const MYSQL_IMAGE: &str = "mysql";
const MYSQL_TAG: &str = "8.0";
const MYSQL_PORT: u16 = 3306;
const ROOT_PASSWORD: &str = "password";
const DATABASE: &str = "documize";

/// Handle to a running `MySQL` container; the container stops on drop.
pub struct TestMySql {
    _container: ContainerAsync<GenericImage>,
    connection_string: String,
}

impl TestMySql {
    /// Driver-form connection string (`user:pass@tcp(host:port)/db`).
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

/// Start a disposable `MySQL` server.
///
/// Returns `Ok(None)` when no Docker daemon is reachable so callers can skip.
///
/// # Errors
///
/// Returns an error if Docker is available but the container fails to start.
pub async fn start_mysql() -> Result<Option<TestMySql>> {
    if !docker_available() {
        return Ok(None);
    }

    // The entrypoint runs a temporary server on port 0 first; wait for the real one.
    let image = GenericImage::new(MYSQL_IMAGE, MYSQL_TAG)
        .with_exposed_port(ContainerPort::Tcp(MYSQL_PORT))
        .with_wait_for(WaitFor::message_on_stderr("port: 3306"));

    let container = image
        .with_env_var("MYSQL_ROOT_PASSWORD", ROOT_PASSWORD)
        .with_env_var("MYSQL_DATABASE", DATABASE)
        .start()
        .await
        .context("failed to start mysql container")?;
    let port = container
        .get_host_port_ipv4(ContainerPort::Tcp(MYSQL_PORT))
        .await
        .context("failed to resolve mysql host port")?;

    Ok(Some(TestMySql {
        _container: container,
        connection_string: format!("root:{ROOT_PASSWORD}@tcp(127.0.0.1:{port})/{DATABASE}"),
    }))
}
