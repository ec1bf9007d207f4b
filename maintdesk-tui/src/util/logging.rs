//! File logging
//!
//! The terminal owns stdout, so log output goes to
//! `<data dir>/maintdesk/maintdesk.log`. `log` records from the library
//! crates are bridged into the tracing subscriber. Filter with `RUST_LOG`
//! (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE: &str = "maintdesk.log";

pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("maintdesk")
}

/// Install the subscriber. Dropping the returned guard flushes the writer.
pub fn init_logging() -> Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        &dir, LOG_FILE,
    ));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .context("installing log subscriber")?;

    tracing::debug!("logging to {}", dir.join(LOG_FILE).display());
    Ok(guard)
}
