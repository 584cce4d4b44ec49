//! Configuration loading
//!
//! The config file is read once at startup and never written: settings
//! toggled in the UI last only for the running session.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::preferences::Preferences;
use crate::session::{TypingTimings, DEFAULT_HIDE_AFTER, DEFAULT_SHOW_AFTER};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred UI language code ("fr", "en"); environment detection when unset
    pub locale: Option<String>,
    /// Display name in the settings profile header
    pub user_name: Option<String>,
    /// Delay before the simulated peer starts typing
    pub typing_delay_ms: u64,
    /// How long the typing indicator stays visible
    pub typing_clear_ms: u64,
    /// Initial values of the settings toggles
    pub preferences: Preferences,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: None,
            user_name: None,
            typing_delay_ms: DEFAULT_SHOW_AFTER.as_millis() as u64,
            typing_clear_ms: DEFAULT_HIDE_AFTER.as_millis() as u64,
            preferences: Preferences::default(),
        }
    }
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "fortresstalk", "fortresstalk")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn typing_timings(&self) -> TypingTimings {
        TypingTimings {
            show_after: Duration::from_millis(self.typing_delay_ms),
            hide_after: Duration::from_millis(self.typing_clear_ms),
        }
    }
}
