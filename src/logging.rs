//! Logging initialization
//!
//! Console output plus a daily-rotated file under the configured logs
//! directory. `RUST_LOG` overrides the default `info` filter.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::{Error, Result};

const LOG_FILE_PREFIX: &str = "e2e-oxide.log";

/// Initialize the global subscriber
///
/// The returned guard flushes the file writer on drop; the caller keeps it
/// alive for the duration of the run.
pub fn init(settings: &Settings) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&settings.logs_dir)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::daily(&settings.logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| Error::internal(format!("logging init: {}", e)))?;

    Ok(guard)
}
