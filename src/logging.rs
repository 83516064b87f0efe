//! File logging. The terminal belongs to the UI, so records go to a plain
//! log file through a non-blocking writer.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, Result};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "FILE_TABLE_LOG";

/// Log file name inside the log directory.
pub const LOG_FILE: &str = "file-table.log";

/// Build the filter: `$FILE_TABLE_LOG` wins over the configured level.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive),
        _ => EnvFilter::try_new(level),
    }
    .map_err(|e| AppError::Logging(e.to_string()))
}

/// Install the global subscriber writing to `dir/file-table.log`.
///
/// The returned guard flushes pending records on drop; keep it alive for
/// the whole run.
pub fn init(dir: &Path, level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let filter = build_filter(level)?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
