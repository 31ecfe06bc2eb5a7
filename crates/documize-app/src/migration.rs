//! Decides whether startup migrates the schema or defers to first-run setup.

use documize_config::SiteMode;
use documize_data::{CONFIG_TABLE, Database};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Result of inspecting the database at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Offline mode; the database was not inspected.
    Skipped,
    /// The configuration table existed and migrations were applied.
    Migrated,
    /// No configuration table yet; the site enters setup mode.
    AwaitingSetup,
}

impl SchemaState {
    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Migrated => "migrated",
            Self::AwaitingSetup => "awaiting_setup",
        }
    }
}

/// Inspect the schema and migrate when the site is already provisioned.
///
/// # Errors
///
/// Returns [`AppError::Migration`] when the table check or a migration fails.
pub async fn trigger<D>(database: &D, site_mode: SiteMode) -> AppResult<SchemaState>
where
    D: Database + ?Sized,
{
    if !site_mode.checks_database() {
        info!(site_mode = %site_mode, "skipping database checks");
        return Ok(SchemaState::Skipped);
    }

    let exists = database
        .config_table_exists()
        .await
        .map_err(|source| AppError::Migration {
            operation: "schema.config_table_exists",
            source,
        })?;

    if !exists {
        info!(
            table = CONFIG_TABLE,
            "going into setup mode to prepare new database"
        );
        return Ok(SchemaState::AwaitingSetup);
    }

    database
        .migrate(true)
        .await
        .map_err(|source| AppError::Migration {
            operation: "schema.migrate",
            source,
        })?;
    info!(table = CONFIG_TABLE, "database migration complete");
    Ok(SchemaState::Migrated)
}
