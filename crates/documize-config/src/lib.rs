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

//! Runtime configuration for the Documize server process.
//!
//! Layout: `flags.rs` (command-line and environment surface), `model.rs`
//! (site mode, TLS paths, product details, `RuntimeConfig`), `defaults.rs`
//! (environment names and fixed port defaults).

pub mod defaults;
pub mod error;
pub mod flags;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use flags::{Flags, LogFormatFlag};
pub use model::{License, ProductInfo, RuntimeConfig, SiteMode, TlsConfig};
