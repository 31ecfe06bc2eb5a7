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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Documize server startup.
//!
//! Layout: `startup.rs` (typed stage sequence), `migration.rs` (schema
//! decision), `salt.rs`, `ports.rs`, `readiness.rs`, `bootstrap.rs`
//! (process entry wiring).

/// Process bootstrap and flag loading.
pub mod bootstrap;
/// Application error types.
pub mod error;
/// Schema migration decision.
pub mod migration;
/// Listener port defaults.
pub mod ports;
/// One-shot readiness notification.
pub mod readiness;
/// Salt generation.
pub mod salt;
/// Typed startup stages.
pub mod startup;

#[cfg(test)]
mod testing;

pub use bootstrap::{run_app, start};
pub use error::{AppError, AppResult};
pub use readiness::{ReadyListener, ReadySignal, readiness};
pub use startup::{Ready, prepare};
