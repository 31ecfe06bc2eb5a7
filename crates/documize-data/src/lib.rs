#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Database access for Documize startup: connection-string normalisation,
//! pool construction, liveness checks, schema inspection, and migrations.

pub mod database;
pub mod dsn;
pub mod error;
pub mod pool;
pub mod schema;

pub use database::{Database, DatabaseConnector, MySqlDatabase};
pub use dsn::{MANDATORY_PARAMS, connect_options, mask_password, normalize};
pub use error::{DataError, Result as DataResult};
pub use pool::{MySqlConnector, PoolPolicy};
pub use schema::CONFIG_TABLE;
