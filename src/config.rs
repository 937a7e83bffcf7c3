//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution. The config file
//! also serves as the property store for the persisted column order.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_DIR_NAME;
use crate::host::PropertyStore;
use crate::services::{normalize_order_text, InvalidColorPolicy};

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display help on startup
    pub show_help_on_startup: bool,
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: true,
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Default brightness (percent) of unmarked cards while a marking exists.
fn default_dim_unmarked() -> u8 {
    40
}

fn default_persist_order() -> bool {
    true
}

/// Board behaviour configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Whether the persisted column order is applied at all
    #[serde(default = "default_persist_order")]
    pub persist_order: bool,
    /// Persisted column order, one label per line
    #[serde(default)]
    pub column_order: String,
    /// Brightness of unmarked cards while something is marked (0-100)
    #[serde(default = "default_dim_unmarked")]
    pub dim_unmarked: u8,
    /// Handling of records with malformed colors
    #[serde(default)]
    pub invalid_colors: InvalidColorPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            persist_order: default_persist_order(),
            column_order: String::new(),
            dim_unmarked: default_dim_unmarked(),
            invalid_colors: InvalidColorPolicy::default(),
        }
    }
}

impl BoardConfig {
    /// Order text handed to the board builder, `None` when persistence is off.
    #[must_use]
    pub fn order_text(&self) -> Option<String> {
        self.persist_order.then(|| self.column_order.clone())
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Kanboard/config.toml`
/// - macOS: `~/Library/Application Support/Kanboard/config.toml`
/// - Windows: `%APPDATA%\Kanboard\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// Board settings
    #[serde(default)]
    pub board: BoardConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/Kanboard/`
    /// - macOS: `~/Library/Application Support/Kanboard/`
    /// - Windows: `%APPDATA%\Kanboard\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default log file used while the terminal UI owns stdout.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("kanboard.log"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to `path` using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .context(format!("Failed to create config directory: {}", dir.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.board.dim_unmarked > 100 {
            anyhow::bail!(
                "board.dim_unmarked must be between 0 and 100, got {}",
                self.board.dim_unmarked
            );
        }
        Ok(())
    }
}

/// Config file acting as the persisted order store.
///
/// Every write updates `board.column_order` and saves the whole file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// Opens the store at the default config location.
    pub fn open_default() -> Result<Self> {
        Self::open(Config::config_file_path()?)
    }

    /// Opens the store at `path`, loading the current config.
    pub fn open(path: PathBuf) -> Result<Self> {
        let config = Config::load_from(&path)?;
        Ok(Self { path, config })
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PropertyStore for ConfigStore {
    fn write_order_text(&mut self, text: &str) -> Result<()> {
        self.config.board.column_order = normalize_order_text(text);
        self.config.save_to(&self.path)
    }
}
