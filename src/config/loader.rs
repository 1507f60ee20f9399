use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/moviedeck/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("moviedeck").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Provider base URLs parse as absolute URLs
    /// - Archive rows and catalog page size are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("metadata.base_url", &self.metadata.base_url),
            ("metadata.image_base_url", &self.metadata.image_base_url),
            ("archive.base_url", &self.archive.base_url),
        ] {
            if reqwest::Url::parse(value).is_err() {
                return Err(ConfigError::ValidationError {
                    message: format!("{} is not a valid URL: '{}'", field, value),
                });
            }
        }

        if self.metadata.max_pages == 0 {
            return Err(ConfigError::ValidationError {
                message: "metadata.max_pages must be at least 1".to_string(),
            });
        }

        if self.archive.rows == 0 {
            return Err(ConfigError::ValidationError {
                message: "archive.rows must be at least 1".to_string(),
            });
        }

        if self.catalog.page_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "catalog.page_size must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
