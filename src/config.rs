//! Configuration file handling.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/wallsync/` on Linux). `WALLSYNC_CONFIG` points at a different
//! file. Every section is optional; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::display::{DisplayOptions, OutputFormat, SystemClock};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "WALLSYNC_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
}

/// How this display behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Wall this screen belongs to
    pub wall: Option<String>,
    /// Synchronizer recompute interval
    pub tick_interval_ms: u64,
    /// Correction added to the system clock, for screens with known skew
    pub clock_offset_ms: i64,
    /// Line format for `wallsync run`
    pub output: OutputFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            wall: None,
            tick_interval_ms: 1000,
            clock_offset_ms: 0,
            output: OutputFormat::Text,
        }
    }
}

/// Where the playlist comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Playlist file path or content API URL
    pub location: Option<String>,
    pub poll_interval_secs: u64,
    /// HTTP request timeout
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: None,
            poll_interval_secs: 30,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Path of the active config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("wallsync").join("config.toml"))
    }

    /// Load the active config, falling back to defaults if the file is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Write to the active config path, creating its directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write config file: {:?}", path))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.source.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs.max(1))
    }

    /// System clock corrected by the configured offset.
    pub fn clock(&self) -> SystemClock {
        SystemClock::with_offset(self.display.clock_offset_ms)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            wall: self.display.wall.clone(),
            tick_interval: Duration::from_millis(self.display.tick_interval_ms.max(1)),
            poll_interval: self.poll_interval(),
        }
    }
}
