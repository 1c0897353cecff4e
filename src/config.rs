// config.rs - Editor policy settings loaded from TOML

use crate::error::ConfigError;
use log::{debug, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TAB_STOP: usize = 8;
pub const DEFAULT_QUIT_TIMES: usize = 3;
pub const DEFAULT_MESSAGE_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Columns per tab stop in the rendered text
    pub tab_stop: usize,
    /// Consecutive quit presses required when there are unsaved changes
    pub quit_times: usize,
    /// Seconds a status message stays visible
    pub message_ttl_secs: u64,
    pub show_welcome: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
            message_ttl_secs: DEFAULT_MESSAGE_TTL_SECS,
            show_welcome: true,
        }
    }
}

impl EditorConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let config: EditorConfig = toml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Load from an explicit path, or from the per-user default location.
    ///
    /// Configuration is never fatal: any failure is logged and defaults are used.
    pub fn load(explicit: Option<&Path>) -> Self {
        match explicit {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                warn!("{}; using defaults", e);
                Self::default()
            }),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                    warn!("{}; using defaults", e);
                    Self::default()
                }),
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        }
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.message_ttl_secs)
    }

    fn normalized(mut self) -> Self {
        self.tab_stop = self.tab_stop.max(1);
        self.quit_times = self.quit_times.max(1);
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scribe").join("config.toml"))
}
