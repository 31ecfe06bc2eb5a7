//! Schema inspection and migrations.

use sqlx::MySqlPool;

use crate::error::{DataError, Result};

/// Table whose presence marks a provisioned database.
pub const CONFIG_TABLE: &str = "config";

const CONFIG_TABLE_EXISTS: &str = r"
    SELECT COUNT(*)
    FROM information_schema.tables
    WHERE table_schema = DATABASE()
      AND table_name = ?
";

/// Whether the configuration table exists in the connected schema.
///
/// # Errors
///
/// Returns an error if the catalog query fails.
pub async fn config_table_exists(pool: &MySqlPool) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(CONFIG_TABLE_EXISTS)
        .bind(CONFIG_TABLE)
        .fetch_one(pool)
        .await
        .map_err(|source| DataError::QueryFailed {
            operation: "schema.config_table_exists",
            source,
        })?;
    Ok(count > 0)
}

/// Report the database server version string.
///
/// # Errors
///
/// Returns an error if the version query fails.
pub async fn server_version(pool: &MySqlPool) -> Result<String> {
    sqlx::query_scalar("SELECT VERSION()")
        .fetch_one(pool)
        .await
        .map_err(|source| DataError::QueryFailed {
            operation: "schema.server_version",
            source,
        })
}

/// Apply pending migrations.
///
/// An existing install may carry scripts applied by a newer build, so missing
/// local scripts are tolerated once the configuration table is present.
///
/// # Errors
///
/// Returns an error if any migration fails to apply.
pub async fn run_migrations(pool: &MySqlPool, config_table_exists: bool) -> Result<()> {
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(config_table_exists);
    migrator
        .run(pool)
        .await
        .map_err(|source| DataError::MigrationFailed { source })?;
    Ok(())
}
