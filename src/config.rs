//! Configuration handling.
//!
//! Configuration is stored as YAML in the platform config directory
//! (or the file named by `TICKETDESK_CONFIG`) and includes:
//! - The ticket service base URL and request timeout
//! - The display preference (light or dark theme)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const CONFIG_PATH_ENV: &str = "TICKETDESK_CONFIG";
pub const API_URL_ENV: &str = "TICKETDESK_API_URL";

pub const VALID_KEYS: &[&str] = &["api.url", "api.timeout_secs", "display.dark_mode"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Ticket service connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Color theme passed explicitly to the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(DeskError::Config(format!(
                "unknown theme '{}', expected 'light' or 'dark'",
                s
            ))),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }

        match directories::ProjectDirs::from("", "", "ticketdesk") {
            Some(dirs) => dirs.config_dir().join("config.yaml"),
            None => PathBuf::from(".ticketdesk").join("config.yaml"),
        }
    }

    /// Load configuration from the default path, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the ticket service URL from the environment or config file
    pub fn api_url(&self) -> String {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }

        self.api.url.clone()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.display.dark_mode)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.display.dark_mode = theme.is_dark();
    }

    /// Get a configuration value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api.url" => Ok(self.api.url.clone()),
            "api.timeout_secs" => Ok(self.api.timeout_secs.to_string()),
            "display.dark_mode" => Ok(self.display.dark_mode.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a configuration value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.url" => {
                url::Url::parse(value)
                    .map_err(|e| DeskError::Config(format!("invalid URL '{}': {}", value, e)))?;
                self.api.url = value.to_string();
            }
            "api.timeout_secs" => {
                let secs: u64 = value.parse().map_err(|_| {
                    DeskError::Config(format!("invalid timeout '{}', expected seconds", value))
                })?;
                if secs == 0 {
                    return Err(DeskError::Config("timeout must be at least 1 second".to_string()));
                }
                self.api.timeout_secs = secs;
            }
            "display.dark_mode" => {
                self.display.dark_mode = value.parse().map_err(|_| {
                    DeskError::Config(format!("invalid value '{}', expected true or false", value))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> DeskError {
    DeskError::Config(format!(
        "unknown key '{}', expected one of: {}",
        key,
        VALID_KEYS.join(", ")
    ))
}
