//! Environment probes for integration suites.

use std::path::Path;
use std::process::Command;

/// Opt-out switch for container-backed suites on machines with Docker installed.
pub const SKIP_CONTAINERS_ENV: &str = "DOCUMIZE_SKIP_CONTAINER_TESTS";

/// Returns `true` if container-backed tests should run on this machine.
#[must_use]
pub fn docker_available() -> bool {
    if std::env::var_os(SKIP_CONTAINERS_ENV).is_some() {
        return false;
    }
    probe_docker(std::env::var("DOCKER_HOST").ok().as_deref())
}

fn probe_docker(host: Option<&str>) -> bool {
    match host {
        Some(host) => host
            .strip_prefix("unix://")
            .is_none_or(|socket| Path::new(socket).exists()),
        None => {
            Path::new("/var/run/docker.sock").exists()
                || Command::new("docker")
                    .arg("info")
                    .output()
                    .is_ok_and(|output| output.status.success())
        }
    }
}
