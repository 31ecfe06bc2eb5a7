//! Typed startup sequence.
//!
//! # Design
//! - Each stage is its own type and consumes the previous one, so the order
//!   `open → ping → schema → salt → ports → ready` is fixed at compile time.
//! - The first failing stage logs the cause and returns; nothing later runs.
//! - `Ready` exposes the configuration read-only for the serving layer.

use documize_config::{RuntimeConfig, SiteMode};
use documize_data::{Database, DatabaseConnector, mask_password, normalize};
use rand::TryCryptoRng;
use rand::rngs::OsRng;
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::migration::{self, SchemaState};
use crate::ports::select_http_port;
use crate::salt;

/// Entry stage: configuration plus a way to open the database.
pub struct Startup<C> {
    connector: C,
    config: RuntimeConfig,
}

impl<C: DatabaseConnector> Startup<C> {
    /// Take ownership of the configuration for the duration of startup.
    pub const fn new(connector: C, config: RuntimeConfig) -> Self {
        Self { connector, config }
    }

    /// Normalise the connection string and open the database handle.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection string is unusable or the
    /// connector cannot produce a handle.
    pub async fn open_database(self) -> AppResult<DatabaseOpened<C::Handle>> {
        let Self {
            connector,
            mut config,
        } = self;
        config.db_conn = normalize(&config.db_conn);

        let database = connector.open(&config.db_conn).await.map_err(|err| {
            error!(
                error = ?err,
                dsn = %mask_password(&config.db_conn),
                "unable to setup database"
            );
            AppError::open(err)
        })?;
        Ok(DatabaseOpened { config, database })
    }
}

/// The database handle exists but has not been contacted.
pub struct DatabaseOpened<D> {
    config: RuntimeConfig,
    database: D,
}

impl<D: Database> DatabaseOpened<D> {
    /// Verify the database answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connectivity`] when the liveness check fails.
    pub async fn ping(self) -> AppResult<DatabaseReachable<D>> {
        if let Err(source) = self.database.ping().await {
            error!(
                error = ?source,
                "unable to connect to database, connection string should be of the form: \
                 'username:password@tcp(host:3306)/database'"
            );
            return Err(AppError::Connectivity {
                operation: "database.ping",
                source,
            });
        }
        info!("database connection established");
        Ok(DatabaseReachable {
            config: self.config,
            database: self.database,
        })
    }
}

/// The database is reachable; schema state is unknown.
pub struct DatabaseReachable<D> {
    config: RuntimeConfig,
    database: D,
}

impl<D: Database> DatabaseReachable<D> {
    /// Migrate the schema, or switch the site into setup mode on first run.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Migration`] when the schema cannot be inspected or
    /// migrated.
    pub async fn prepare_schema(self) -> AppResult<SchemaPrepared<D>> {
        let Self {
            mut config,
            database,
        } = self;

        let schema = migration::trigger(&database, config.site_mode)
            .await
            .inspect_err(|err| error!(error = ?err, "unable to run database migration"))?;
        if schema == SchemaState::AwaitingSetup {
            config.site_mode = SiteMode::Setup;
        }

        Ok(SchemaPrepared {
            config,
            database,
            schema,
        })
    }
}

/// Schema handled; the salt may still be missing.
pub struct SchemaPrepared<D> {
    config: RuntimeConfig,
    database: D,
    schema: SchemaState,
}

impl<D> SchemaPrepared<D> {
    /// Keep the configured salt or generate one from the OS random source.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Entropy`] when the random source fails.
    pub fn provision_salt(self) -> AppResult<SaltProvisioned<D>> {
        self.provision_salt_with(&mut OsRng)
    }

    /// Keep the configured salt or generate one from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Entropy`] when the random source fails.
    pub fn provision_salt_with<R>(self, rng: &mut R) -> AppResult<SaltProvisioned<D>>
    where
        R: TryCryptoRng + ?Sized,
    {
        let Self {
            mut config,
            database,
            schema,
        } = self;

        let salt = salt::provision_with(config.salt.as_deref(), rng)
            .inspect_err(|err| error!(error = ?err, "problem using secure random source"))?;
        config.salt = Some(salt.clone());

        Ok(SaltProvisioned {
            config,
            database,
            schema,
            salt,
        })
    }
}

/// Salt resolved; ports not yet chosen.
pub struct SaltProvisioned<D> {
    config: RuntimeConfig,
    database: D,
    schema: SchemaState,
    salt: String,
}

impl<D> SaltProvisioned<D> {
    /// Fill in the HTTP port and finish startup.
    #[must_use]
    pub fn select_ports(self) -> Ready<D> {
        let Self {
            mut config,
            database,
            schema,
            salt,
        } = self;

        let http_port = select_http_port(&config.tls, config.http_port);
        config.http_port = Some(http_port);

        Ready {
            config,
            database,
            schema,
            salt,
            http_port,
        }
    }
}

/// Terminal stage: configuration is complete and no longer mutable.
#[derive(Debug)]
pub struct Ready<D> {
    config: RuntimeConfig,
    database: D,
    schema: SchemaState,
    salt: String,
    http_port: u16,
}

impl<D> Ready<D> {
    /// Resolved runtime configuration.
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Database handle for the serving layer.
    pub const fn database(&self) -> &D {
        &self.database
    }

    /// Outcome of the schema stage.
    pub const fn schema(&self) -> SchemaState {
        self.schema
    }

    /// Resolved salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Resolved HTTP listener port.
    pub const fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Effective site mode after the schema stage.
    pub const fn site_mode(&self) -> SiteMode {
        self.config.site_mode
    }
}

/// Run every stage in order against `config`.
///
/// # Errors
///
/// Returns the first stage failure; later stages do not run.
pub async fn prepare<C: DatabaseConnector>(
    connector: C,
    config: RuntimeConfig,
) -> AppResult<Ready<C::Handle>> {
    Ok(Startup::new(connector, config)
        .open_database()
        .await?
        .ping()
        .await?
        .prepare_schema()
        .await?
        .provision_salt()?
        .select_ports())
}
