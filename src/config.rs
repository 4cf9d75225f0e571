//! Client configuration.
//!
//! Every field is optional in the TOML file; missing fields fall back to
//! the defaults below.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "https://motivational-calendar.vercel.app";

/// Name used in the personalized greeting until the user sets one.
pub const DEFAULT_USER_NAME: &str = "Friend";

/// Top-level configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Name sent with the personalized message request.
    pub user_name: String,
    /// Base URL of the motivation backend.
    pub backend_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Seconds between automatic content refreshes.
    pub refresh_interval_secs: u64,
    /// Seconds between scheduler polls of the due-task list.
    pub tick_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_name: DEFAULT_USER_NAME.to_owned(),
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            request_timeout_secs: 5,
            refresh_interval_secs: 3600,
            tick_interval_secs: 60,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Load the file at `path` if it exists, otherwise return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match std::fs::metadata(path) {
            Ok(_) => Self::from_file(path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::app_dirs::config_file()
    }

    /// Apply command-line overrides on top of file values.
    pub fn with_overrides(mut self, user_name: Option<String>, backend_url: Option<String>) -> Self {
        if let Some(name) = user_name {
            self.user_name = name;
        }
        if let Some(url) = backend_url {
            self.backend_url = url;
        }
        self
    }

    /// Reject values the client cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        crate::api::parse_backend_url(&self.backend_url)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        if self.request_timeout_secs == 0 {
            return Err(ClientError::Config(
                "request_timeout_secs must be greater than zero".to_owned(),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ClientError::Config(
                "refresh_interval_secs must be greater than zero".to_owned(),
            ));
        }
        if self.tick_interval_secs == 0 {
            return Err(ClientError::Config(
                "tick_interval_secs must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Scheduler poll interval.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}
