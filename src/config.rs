// ⚙️ Configuration - TOML file with per-section defaults
//
// Every section is optional; a missing file means "all defaults".

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "culture-desk.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub dashboard: DashboardConfig,
    pub storage: StorageConfig,
    pub login: LoginConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "info" or "culture_desk=debug"
    pub level: String,
    /// Log file; stdout belongs to the terminal UI
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: PathBuf::from("culture-desk.log"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Interval between synthetic metrics samples
    pub poll_interval_ms: u64,
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        // A zero interval would make tokio's interval panic
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            poll_interval_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON array of planning snapshots, rewritten on every save
    pub planning_snapshots: PathBuf,
    /// Directory for analytics CSV exports
    pub export_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            planning_snapshots: PathBuf::from("data_planning.json"),
            export_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    /// Prefilled into the username field
    pub default_username: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        LoginConfig {
            default_username: "admin".to_string(),
        }
    }
}

/// Load and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Like `load_config`, but a missing file yields the defaults.
pub fn load_or_default(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(AppConfig::default())
    }
}
