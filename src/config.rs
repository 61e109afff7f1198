//! Configuration management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

/// Translation API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Translation endpoint (default: the DeepL free-tier endpoint)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Notification title
    #[serde(default = "default_title")]
    pub title: String,
    /// Display budget before the body is truncated
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            max_chars: default_max_chars(),
        }
    }
}

fn default_title() -> String {
    "Translator".to_string()
}

fn default_max_chars() -> usize {
    100
}

impl Config {
    /// Load configuration from the default location, or defaults when absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Get the default config path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("transclip")
            .join("config.toml")
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

/// Read the DeepL credential from the process environment.
///
/// Absence is a checked condition handled by the translation client,
/// not an error here.
pub fn credential_from_env() -> Option<String> {
    std::env::var("DEEPL_API_KEY").ok().filter(|k| !k.is_empty())
}
