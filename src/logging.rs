//! Tracing subscriber setup.
//!
//! The interactive client owns the terminal, so its logs go to a daily
//! rolling file. Headless runs log to stderr. `RUST_LOG` overrides the
//! default filter in both cases.

use crate::error::{ClientError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "daily_motivation=info,reqwest=warn,hyper=warn";

const LOG_FILE_PREFIX: &str = "daily-motivation.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to a daily-rolling file in `dir`.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the background writer.
///
/// # Errors
///
/// Returns [`ClientError::Io`] if `dir` cannot be created and
/// [`ClientError::Logging`] if a global subscriber is already set.
pub fn init_file(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(env_filter())
        .try_init()
        .map_err(|e| ClientError::Logging(e.to_string()))?;
    Ok(guard)
}

/// Log to stderr so stdout stays clean for printed content.
///
/// # Errors
///
/// Returns [`ClientError::Logging`] if a global subscriber is already set.
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter())
        .try_init()
        .map_err(|e| ClientError::Logging(e.to_string()))
}
