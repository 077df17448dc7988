//! Configuration module for the paylink console.
//!
//! Handles loading configuration from a TOML file and applying CLI
//! overrides on top of it.

pub mod file;

use crate::config::file::FileConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub open_browser: bool,
    pub browser_command: String,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    base_url_override: Option<Url>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, base_url_override: Option<Url>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            base_url_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, falling back to defaults if it does not exist
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let mut file_config = if self.config_path.exists() {
            let content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str::<FileConfig>(&content)?
        } else {
            tracing::info!(
                "No config file at {:?}, using defaults",
                self.config_path
            );
            FileConfig::default()
        };

        if let Some(base_url) = &self.base_url_override {
            file_config.gateway.base_url = base_url.clone();
        }

        self.validate(&file_config)?;

        Ok(ClientConfig {
            base_url: file_config.gateway.base_url,
            timeout: Duration::from_secs(file_config.gateway.timeout_secs),
            open_browser: file_config.browser.open,
            browser_command: file_config.browser.command,
        })
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let base_url = &config.gateway.base_url;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "gateway base_url must be http or https, got {base_url}"
            )));
        }
        if config.gateway.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gateway timeout_secs must be greater than zero".to_owned(),
            ));
        }
        if config.browser.open && config.browser.command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "browser command must be set when browser.open is enabled".to_owned(),
            ));
        }
        Ok(())
    }
}
