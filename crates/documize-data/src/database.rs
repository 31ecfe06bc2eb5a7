//! Database handle seams used by the startup sequence.
//!
//! # Design
//! - The startup stages only see these traits, so tests can drive every branch
//!   with in-memory fakes while production uses `MySqlDatabase`.

use async_trait::async_trait;
use sqlx::{Connection, MySqlPool};
use tracing::info;

use crate::error::{DataError, Result};
use crate::schema;

/// Opens a database handle from a normalised connection string.
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    /// Handle produced by a successful open.
    type Handle: Database;

    /// Prepare a handle without necessarily connecting.
    async fn open(&self, dsn: &str) -> Result<Self::Handle>;
}

/// Operations the startup sequence performs against an open database.
#[async_trait]
pub trait Database: Send + Sync {
    /// Verify the database is reachable.
    async fn ping(&self) -> Result<()>;
    /// Whether the configuration table exists.
    async fn config_table_exists(&self) -> Result<bool>;
    /// Apply schema migrations.
    async fn migrate(&self, config_table_exists: bool) -> Result<()>;
}

/// `MySQL`-backed database handle shared with the serving layer.
#[derive(Clone, Debug)]
pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    #[must_use]
    /// Wrap an existing pool.
    pub const fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Access the underlying `SQLx` connection pool.
    #[must_use]
    pub const fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    async fn ping(&self) -> Result<()> {
        let mut connection = self
            .pool
            .acquire()
            .await
            .map_err(|source| DataError::PingFailed { source })?;
        connection
            .ping()
            .await
            .map_err(|source| DataError::PingFailed { source })
    }

    async fn config_table_exists(&self) -> Result<bool> {
        let version = schema::server_version(&self.pool).await?;
        info!(version = %version, "database server detected");
        schema::config_table_exists(&self.pool).await
    }

    async fn migrate(&self, config_table_exists: bool) -> Result<()> {
        schema::run_migrations(&self.pool, config_table_exists).await
    }
}
