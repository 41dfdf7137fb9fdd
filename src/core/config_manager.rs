// src/core/config_manager.rs
//! Layered configuration: defaults, optional YAML file, environment, CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::core::service_client::DEFAULT_TIMEOUT_SECS;
use crate::utils::resolve_path;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONFIG_FILE: &str = "tailorcv.yaml";
pub const DEFAULT_STATE_DIR: &str = ".tailorcv";

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigManager {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub state_dir: PathBuf,
    /// Stored results older than this read as missing. `None` keeps them forever.
    pub max_age_hours: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    service: ServiceSection,
    storage: StorageSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServiceSection {
    api_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageSection {
    state_dir: Option<PathBuf>,
    max_age_hours: Option<i64>,
}

/// Values passed on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub timeout_seconds: Option<u64>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                api_url: DEFAULT_API_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECS,
            },
            storage: StorageConfig {
                state_dir: PathBuf::from(DEFAULT_STATE_DIR),
                max_age_hours: None,
            },
        }
    }
}

impl ConfigManager {
    /// Load all configuration layers from the process environment
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let config_path = std::env::var("TAILORCV_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::default();
        if config_path.exists() {
            config.merge_file(&config_path)?;
        }
        config.merge_env(|key| std::env::var(key).ok())?;
        config.merge_overrides(overrides);
        config.storage.state_dir = resolve_path(&config.storage.state_dir)?;

        info!(
            "Configuration loaded: api_url={}, timeout={}s, state_dir={}",
            config.service.api_url,
            config.service.timeout_seconds,
            config.storage.state_dir.display()
        );

        Ok(config)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.merge_yaml(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn merge_yaml(&mut self, content: &str) -> Result<()> {
        let file: ConfigFile = serde_yaml::from_str(content)?;

        if let Some(api_url) = file.service.api_url {
            self.service.api_url = api_url;
        }
        if let Some(timeout) = file.service.timeout_seconds {
            self.service.timeout_seconds = timeout;
        }
        if let Some(state_dir) = file.storage.state_dir {
            self.storage.state_dir = state_dir;
        }
        if let Some(hours) = file.storage.max_age_hours {
            self.storage.max_age_hours = Some(checked_max_age_hours(hours)?);
        }

        Ok(())
    }

    pub fn merge_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_url) = lookup("TAILORCV_API_URL") {
            self.service.api_url = api_url;
        }
        if let Some(timeout) = lookup("TAILORCV_TIMEOUT_SECS") {
            self.service.timeout_seconds = timeout
                .parse()
                .context("TAILORCV_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        if let Some(state_dir) = lookup("TAILORCV_STATE_DIR") {
            self.storage.state_dir = PathBuf::from(state_dir);
        }
        if let Some(hours) = lookup("TAILORCV_MAX_AGE_HOURS") {
            let hours = hours
                .parse()
                .context("TAILORCV_MAX_AGE_HOURS must be a whole number of hours")?;
            self.storage.max_age_hours = Some(
                checked_max_age_hours(hours).context("Invalid TAILORCV_MAX_AGE_HOURS")?,
            );
        }

        Ok(())
    }

    pub fn merge_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(api_url) = overrides.api_url {
            self.service.api_url = api_url;
        }
        if let Some(state_dir) = overrides.state_dir {
            self.storage.state_dir = state_dir;
        }
        if let Some(timeout) = overrides.timeout_seconds {
            self.service.timeout_seconds = timeout;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_seconds)
    }

    pub fn max_age(&self) -> Option<chrono::Duration> {
        self.storage
            .max_age_hours
            .and_then(chrono::Duration::try_hours)
    }
}

/// Max age must be positive and representable as a `chrono::Duration`.
fn checked_max_age_hours(hours: i64) -> Result<i64> {
    if hours <= 0 || chrono::Duration::try_hours(hours).is_none() {
        anyhow::bail!("max_age_hours must be a positive number of hours, got {}", hours);
    }
    Ok(hours)
}
