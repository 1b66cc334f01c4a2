//! Configuration loading and defaults.
//!
//! Layering, lowest priority first: embedded defaults, the user config at
//! `~/.config/patdraft/config.toml`, an explicit `--config` file, then
//! `PATDRAFT__*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub downloads: DownloadsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the drafting backend; `/drafts` is appended by the
    /// client.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// User identity sent with project listing and draft creation. Real
    /// authentication lives behind the backend.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_user_id() -> String {
    "default_user".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_id: default_user_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval for the TUI loop.
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate_ms: u64,
}

fn default_refresh_rate() -> u64 {
    250
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// TUI mode writes to a session log file; CLI mode always uses stderr.
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadsConfig {
    /// Directory where downloaded documents are written. Relative paths are
    /// resolved against the current directory.
    #[serde(default = "default_download_dir")]
    pub dir: String,
}

fn default_download_dir() -> String {
    ".".to_string()
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
            downloads: DownloadsConfig::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start from embedded defaults so patdraft works with no config
        // files at all.
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("patdraft").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PATDRAFT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Directory for TUI session logs.
    pub fn logs_path(&self) -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("patdraft")
            .join("logs")
    }

    /// Resolved download directory.
    pub fn downloads_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.downloads.dir);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }
}
