//! In-memory database fakes for startup tests.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use documize_data::{Database, DatabaseConnector, DataError, DataResult};
use rand::{TryCryptoRng, TryRngCore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Open(String),
    Ping,
    CheckTable,
    Migrate(bool),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum TableState {
    #[default]
    Exists,
    Missing,
    Unreadable,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Script {
    pub(crate) reject_dsn: bool,
    pub(crate) ping_fails: bool,
    pub(crate) table: TableState,
    pub(crate) migrate_fails: bool,
}

type CallLog = Arc<Mutex<Vec<Call>>>;

fn record(log: &CallLog, call: Call) {
    log.lock().unwrap_or_else(PoisonError::into_inner).push(call);
}

#[derive(Debug, Clone)]
pub(crate) struct FakeDatabase {
    script: Script,
    log: CallLog,
}

impl FakeDatabase {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            script,
            log: CallLog::default(),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Database for FakeDatabase {
    async fn ping(&self) -> DataResult<()> {
        record(&self.log, Call::Ping);
        if self.script.ping_fails {
            return Err(DataError::PingFailed {
                source: sqlx::Error::PoolTimedOut,
            });
        }
        Ok(())
    }

    async fn config_table_exists(&self) -> DataResult<bool> {
        record(&self.log, Call::CheckTable);
        match self.script.table {
            TableState::Exists => Ok(true),
            TableState::Missing => Ok(false),
            TableState::Unreadable => Err(DataError::QueryFailed {
                operation: "schema.config_table_exists",
                source: sqlx::Error::PoolClosed,
            }),
        }
    }

    async fn migrate(&self, config_table_exists: bool) -> DataResult<()> {
        record(&self.log, Call::Migrate(config_table_exists));
        if self.script.migrate_fails {
            return Err(DataError::MigrationFailed {
                source: sqlx::migrate::MigrateError::VersionMissing(1),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeConnector {
    database: FakeDatabase,
}

impl FakeConnector {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            database: FakeDatabase::new(script),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.database.calls()
    }
}

#[async_trait]
impl DatabaseConnector for FakeConnector {
    type Handle = FakeDatabase;

    async fn open(&self, dsn: &str) -> DataResult<Self::Handle> {
        record(&self.database.log, Call::Open(dsn.to_string()));
        if self.database.script.reject_dsn {
            return Err(DataError::InvalidConnectionString {
                masked: documize_data::mask_password(dsn),
                reason: "missing_database",
            });
        }
        Ok(self.database.clone())
    }
}

/// Random source that always fails.
pub(crate) struct Exhausted;

#[derive(Debug)]
pub(crate) struct SourceClosed;

impl fmt::Display for SourceClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("entropy source closed")
    }
}

impl TryRngCore for Exhausted {
    type Error = SourceClosed;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Err(SourceClosed)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Err(SourceClosed)
    }

    fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
        Err(SourceClosed)
    }
}

impl TryCryptoRng for Exhausted {}
