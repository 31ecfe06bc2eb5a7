//! Connection pool policy and construction.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::MySqlPoolOptions;
use tracing::debug;

use crate::database::{DatabaseConnector, MySqlDatabase};
use crate::dsn::{connect_options, mask_password};
use crate::error::Result;

/// Fixed pool sizing applied to the server database handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPolicy {
    /// Maximum number of open connections.
    pub max_open: u32,
    /// How long an idle connection is retained before being closed.
    pub idle_timeout: Duration,
    /// Maximum lifetime of any single connection.
    pub max_lifetime: Duration,
}

impl PoolPolicy {
    /// Policy used by the server process.
    pub const SERVER: Self = Self {
        max_open: 100,
        idle_timeout: Duration::from_secs(600),
        max_lifetime: Duration::from_secs(14_400),
    };

    fn pool_options(self) -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(self.max_open)
            .min_connections(0)
            .idle_timeout(Some(self.idle_timeout))
            .max_lifetime(Some(self.max_lifetime))
    }
}

impl Default for PoolPolicy {
    fn default() -> Self {
        Self::SERVER
    }
}

/// Opens lazily-connected `MySQL` pools.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector {
    policy: PoolPolicy,
}

impl MySqlConnector {
    #[must_use]
    /// Construct a connector applying the supplied pool policy.
    pub const fn new(policy: PoolPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    /// Pool policy applied to opened handles.
    pub const fn policy(&self) -> PoolPolicy {
        self.policy
    }
}

#[async_trait]
impl DatabaseConnector for MySqlConnector {
    type Handle = MySqlDatabase;

    async fn open(&self, dsn: &str) -> Result<Self::Handle> {
        let options = connect_options(dsn)?;
        debug!(dsn = %mask_password(dsn), "opening database pool");
        // No connection is made until the first acquire; `ping` is the first one.
        let pool = self.policy.pool_options().connect_lazy_with(options);
        Ok(MySqlDatabase::new(pool))
    }
}
