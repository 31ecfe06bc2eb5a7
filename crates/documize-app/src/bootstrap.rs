use clap::Parser;
use documize_config::{Flags, LogFormatFlag};
use documize_data::{DatabaseConnector, MySqlConnector, PoolPolicy};
use documize_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::readiness::{ReadySignal, readiness};
use crate::startup::{Ready, prepare};

/// Entry point for the Documize process.
///
/// Parses flags, installs logging, runs startup, then holds the prepared
/// runtime until Ctrl-C. HTTP serving is mounted by the embedding layer on top
/// of the `Ready` value returned from [`start`].
///
/// # Errors
///
/// Returns an error if logging cannot be installed, any startup stage fails, or
/// the shutdown signal cannot be awaited.
pub async fn run_app() -> AppResult<()> {
    let flags = Flags::parse();
    documize_telemetry::init_logging(&logging_config(flags.log_format))
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new("startup", "Community");

    let (signal, _listener) = readiness();
    let ready = start(flags, MySqlConnector::new(PoolPolicy::SERVER), signal).await?;

    info!(port = ready.http_port(), "waiting for shutdown signal");
    tokio::signal::ctrl_c()
        .await
        .map_err(|source| AppError::Io {
            operation: "signal.ctrl_c",
            source,
        })?;

    ready.database().pool().close().await;
    info!("shutdown complete");
    Ok(())
}

/// Convert flags into configuration, run every startup stage, and fire the
/// readiness signal on success.
///
/// The signal is dropped unfired when any stage fails.
///
/// # Errors
///
/// Returns the first configuration or startup stage failure.
pub async fn start<C: DatabaseConnector>(
    flags: Flags,
    connector: C,
    signal: ReadySignal,
) -> AppResult<Ready<C::Handle>> {
    let config = flags
        .into_runtime_config()
        .map_err(|err| AppError::config("flags.into_runtime_config", err))?;
    info!(
        version = %config.product.version,
        edition = %config.product.edition,
        site_mode = %config.site_mode,
        "Documize bootstrap starting"
    );

    let ready = prepare(connector, config).await?;

    match serde_json::to_string(ready.config()) {
        Ok(summary) => info!(
            config = %summary,
            schema = ready.schema().as_str(),
            "startup complete"
        ),
        Err(err) => warn!(error = %err, "failed to render runtime configuration"),
    }
    signal.signal();
    Ok(ready)
}

fn logging_config(format: Option<LogFormatFlag>) -> LoggingConfig<'static> {
    let mut config = LoggingConfig::default();
    if let Some(format) = format {
        config.format = match format {
            LogFormatFlag::Json => LogFormat::Json,
            LogFormatFlag::Pretty => LogFormat::Pretty,
        };
    }
    config
}
