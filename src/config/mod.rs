//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables (`BORGDECK_*`)
//! - CLI arguments (applied by the binary on top of the loaded config)

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BorgdeckError, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Maintenance polling configuration
    #[serde(default)]
    pub polling: PollingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| BorgdeckError::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| BorgdeckError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("BORGDECK_API_URL") {
            config.api.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("BORGDECK_API_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                config.api.timeout_secs = timeout;
            }
        }
        if let Ok(interval) = std::env::var("BORGDECK_POLL_INTERVAL_MS") {
            if let Ok(interval) = interval.parse() {
                config.polling.interval_ms = interval;
            }
        }

        config
    }

    /// Default config file location (`<config dir>/borgdeck/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("borgdeck").join("config.toml"))
    }

    /// Load the default config file if present, then overlay environment
    /// variables. Missing file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        let file_config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        Ok(file_config.merge(Self::from_env()))
    }

    /// Merge with another config (other takes precedence where it differs
    /// from the defaults)
    pub fn merge(self, other: Self) -> Self {
        let defaults = Self::default();
        Self {
            api: ApiConfig {
                base_url: if other.api.base_url != defaults.api.base_url {
                    other.api.base_url
                } else {
                    self.api.base_url
                },
                timeout_secs: if other.api.timeout_secs != defaults.api.timeout_secs {
                    other.api.timeout_secs
                } else {
                    self.api.timeout_secs
                },
            },
            polling: PollingConfig {
                interval_ms: if other.polling.interval_ms != defaults.polling.interval_ms {
                    other.polling.interval_ms
                } else {
                    self.polling.interval_ms
                },
            },
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backup manager backend
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8200".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Maintenance polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Poll cadence in milliseconds while a maintenance job runs
    pub interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 3000 }
    }
}

impl PollingConfig {
    /// Poll cadence as a [`Duration`]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8200");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.polling.interval_ms, 3000);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [api]
            base_url = "http://backup.local:9000"
            timeout_secs = 10

            [polling]
            interval_ms = 1000
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "http://backup.local:9000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.polling.interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"http://x:1\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://x:1");
        assert_eq!(config.polling.interval_ms, 3000);
    }

    #[test]
    fn test_merge_other_wins_when_not_default() {
        let base = Config {
            api: ApiConfig {
                base_url: "http://file:1".to_string(),
                timeout_secs: 5,
            },
            polling: PollingConfig::default(),
        };
        let overlay = Config {
            api: ApiConfig {
                base_url: "http://env:2".to_string(),
                ..ApiConfig::default()
            },
            polling: PollingConfig::default(),
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.api.base_url, "http://env:2");
        // overlay left timeout at default, so the file value survives
        assert_eq!(merged.api.timeout_secs, 5);
    }

    #[test]
    fn test_from_file_missing_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, BorgdeckError::Config(_)));
    }
}
