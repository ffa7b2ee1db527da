use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{MonitorTarget, RegistryError, TargetRegistry, ThresholdPolicy, DEFAULT_HISTORY_SIZE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid targets: {0}")]
    Registry(#[from] RegistryError),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub proc_path: PathBuf,
    pub uptime: UptimeConfig,
    pub resources: ResourceConfig,
}

/// Settings for the HTTP endpoint monitor
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UptimeConfig {
    pub interval_secs: u64,
    pub timeout_secs: u64,
    pub history_size: usize,
    pub log_file: PathBuf,
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    pub url: String,
}

/// Settings for the local resource monitor
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub interval_secs: u64,
    pub cpu_sample_ms: u64,
    pub disk_path: PathBuf,
    pub log_file: PathBuf,
    pub thresholds: ThresholdPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            proc_path: PathBuf::from("/proc"),
            uptime: UptimeConfig::default(),
            resources: ResourceConfig::default(),
        }
    }
}

impl Default for UptimeConfig {
    fn default() -> Self {
        let target = |name: &str, url: &str| TargetConfig {
            name: name.to_string(),
            url: url.to_string(),
        };
        Self {
            interval_secs: 300,
            timeout_secs: 10,
            history_size: DEFAULT_HISTORY_SIZE,
            log_file: PathBuf::from("app_health.log"),
            targets: vec![
                target("Main Website", "https://example.com"),
                target("API Server", "https://api.example.com/health"),
                target("Admin Panel", "https://admin.example.com/status"),
            ],
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            cpu_sample_ms: 1000,
            disk_path: PathBuf::from("/"),
            log_file: PathBuf::from("system_health.log"),
            thresholds: ThresholdPolicy::default(),
        }
    }
}

impl Config {
    /// Defaults, then the optional TOML file, then `HEALTHMON_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(level) = var("HEALTHMON_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(path) = var("HEALTHMON_PROC_PATH") {
            self.proc_path = PathBuf::from(path);
        }
        if let Some(secs) = var("HEALTHMON_UPTIME_INTERVAL").and_then(|s| s.parse().ok()) {
            self.uptime.interval_secs = secs;
        }
        if let Some(secs) = var("HEALTHMON_RESOURCE_INTERVAL").and_then(|s| s.parse().ok()) {
            self.resources.interval_secs = secs;
        }
    }

    /// HTTP targets in the order they were configured
    pub fn uptime_registry(&self) -> Result<TargetRegistry, ConfigError> {
        let targets = self
            .uptime
            .targets
            .iter()
            .map(|t| MonitorTarget::http(t.name.clone(), t.url.clone()))
            .collect();
        Ok(TargetRegistry::new(targets)?)
    }
}

impl UptimeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ResourceConfig {
    pub fn cpu_window(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_ms)
    }
}
