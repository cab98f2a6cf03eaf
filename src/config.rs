use crate::ticker::{DEFAULT_POLL_MS, DEFAULT_TICK_MS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding the configured log level
pub const LOG_LEVEL_ENV: &str = "WEEKPLAN_LOG";

/// App settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Timer tick interval; one tick adds one second of tracked time
    pub tick_interval_ms: u64,
    /// How long the UI waits for input before ticking
    pub ui_poll_ms: u64,
    pub log_level: String,
    /// Ask before deleting a task
    pub confirm_delete: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_MS,
            ui_poll_ms: DEFAULT_POLL_MS,
            log_level: "info".to_string(),
            confirm_delete: true,
        }
    }
}

impl AppConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Configured level, unless overridden from the environment
    pub fn effective_log_level(&self) -> String {
        std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.log_level.clone())
    }
}

/// Load config from config.json; a missing file yields defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: AppConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

/// Save config to config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = tempdir().unwrap();
        let config = load_config(temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"confirm_delete": false}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.confirm_delete);
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_MS);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = AppConfig {
            tick_interval_ms: 500,
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = AppConfig {
            tick_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }
}
