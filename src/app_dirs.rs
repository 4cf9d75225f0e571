//! Centralized application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | Config | `~/Library/Application Support/daily-motivation/` | `~/.config/daily-motivation/` |
//! | Logs | `~/Library/Application Support/daily-motivation/logs/` | `~/.local/share/daily-motivation/logs/` |
//!
//! # Environment Overrides
//!
//! - `DAILY_MOTIVATION_CONFIG_DIR` overrides [`config_dir`]
//! - `DAILY_MOTIVATION_LOG_DIR` overrides [`logs_dir`]

use std::path::PathBuf;

const APP_DIR_NAME: &str = "daily-motivation";

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/daily-motivation/` by default.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("DAILY_MOTIVATION_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join("daily-motivation-config"))
}

/// Default config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Log file directory.
///
/// Resolves to `dirs::data_dir()/daily-motivation/logs/` by default.
#[must_use]
pub fn logs_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("DAILY_MOTIVATION_LOG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME).join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("daily-motivation-logs"))
}
