//! Doctor Configuration
//!
//! Settings are read from `config.toml` in the platform config directory.
//! A missing file means defaults; the file is never created.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DoctorError, Result};

/// Main doctor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorConfig {
    /// Upper bound for each external command, in seconds
    pub probe_timeout_secs: u64,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
    /// Exit with a failure status when any error was reported
    pub strict: bool,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 30,
            log_level: "info".to_string(),
            strict: false,
        }
    }
}

impl DoctorConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "droid-doctor", "droid-doctor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults
    pub async fn load() -> Result<Self> {
        match Self::config_file() {
            Some(path) if path.exists() => Self::load_from(&path).await,
            _ => {
                debug!("Config file not found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit file, which must exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = tokio::fs::read_to_string(path).await?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: DoctorConfig = toml::from_str(contents)?;
        if config.probe_timeout_secs == 0 {
            return Err(DoctorError::Config(
                "probe_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(config)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
