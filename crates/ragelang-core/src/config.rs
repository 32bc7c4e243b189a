//! User configuration and its TOML persistence.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "RAGELANG_API_KEY";

/// Default generative model.
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Default generative API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
/// Errors produced while loading, saving or editing the configuration.
pub enum ConfigError {
    #[error("I/O error on {}: {source}", .path.display())]
    /// Reading or writing the config file failed.
    Io {
        /// The config file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    /// The config file is not valid TOML for [`RoastConfig`].
    Parse {
        /// The config file.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    /// Serializing the config failed.
    Serialize(#[from] toml::ser::Error),

    #[error("no config directory available on this platform")]
    /// `dirs::config_dir()` returned nothing.
    NoConfigDir,

    #[error("Please enter a valid number of seconds")]
    /// A cooldown value that is not a non-negative integer.
    InvalidCooldown(String),

    #[error("API key cannot be empty")]
    /// An empty API key.
    EmptyApiKey,
}

/// Add-on configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoastConfig {
    /// Whether automatic roasts are enabled.
    pub enabled: bool,
    /// Minimum seconds between two automatic roasts.
    pub cooldown_seconds: u64,
    /// API key for the generative text service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Generative model name.
    pub model: String,
    /// Generative API base URL.
    pub endpoint: String,
    /// Seconds a ghost comment stays visible.
    pub display_seconds: u64,
    /// Timeout for one generation request.
    pub request_timeout_seconds: u64,
}

impl Default for RoastConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_seconds: 3,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            display_seconds: 5,
            request_timeout_seconds: 10,
        }
    }
}

impl RoastConfig {
    /// Default config file location: `<config_dir>/ragelang/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("ragelang").join("config.toml"))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(io_err)
    }

    /// Apply environment overrides ([`API_KEY_ENV`]).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.api_key = Some(key.trim().to_string());
        }
        self
    }

    /// Cooldown as a duration.
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_seconds)
    }

    /// Ghost comment lifetime as a duration.
    pub fn display_duration(&self) -> Duration {
        Duration::from_secs(self.display_seconds)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Set the cooldown from user input. Invalid input leaves the config unchanged.
    pub fn set_cooldown_input(&mut self, input: &str) -> Result<u64, ConfigError> {
        let seconds = parse_cooldown_input(input)?;
        self.cooldown_seconds = seconds;
        Ok(seconds)
    }

    /// Set the API key. Blank keys are rejected.
    pub fn set_api_key(&mut self, key: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        self.api_key = Some(key.to_string());
        Ok(())
    }
}

/// Parse a cooldown entered by the user: a non-negative whole number of seconds.
pub fn parse_cooldown_input(input: &str) -> Result<u64, ConfigError> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidCooldown(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cooldown_input() {
        assert_eq!(parse_cooldown_input(" 7 ").unwrap(), 7);
        assert_eq!(parse_cooldown_input("0").unwrap(), 0);
        assert!(parse_cooldown_input("-1").is_err());
        assert!(parse_cooldown_input("abc").is_err());
        assert!(parse_cooldown_input("").is_err());
        assert!(parse_cooldown_input("1.5").is_err());
    }

    #[test]
    fn test_invalid_cooldown_leaves_config_unchanged() {
        let mut config = RoastConfig::default();
        let err = config.set_cooldown_input("soon").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid number of seconds");
        assert_eq!(config.cooldown_seconds, 3);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: RoastConfig = toml::from_str("enabled = false\n").unwrap();
        assert!(!config.enabled);
        assert_eq!(config.cooldown_seconds, 3);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key(), None);
    }
}
