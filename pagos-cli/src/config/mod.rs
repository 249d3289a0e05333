//! Configuration for the payments terminal.
//!
//! Handles loading configuration from a TOML file and applying CLI
//! overrides.

pub mod file;

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::config::file::FileConfig;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
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
    /// A missing file is not an error: the defaults point at the school's
    /// hosted backend.
    pub fn load(&self) -> Result<FileConfig, ConfigError> {
        let mut config = if self.config_path.exists() {
            let content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            tracing::info!(path = ?self.config_path, "config file not found, using defaults");
            FileConfig::default()
        };

        if let Some(base_url) = &self.base_url_override {
            config.backend.base_url = base_url.clone();
        }

        Ok(config)
    }
}
