//! Pizzeria configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::coordinator::CoordinatorConfig;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Coordinator channel sizing
    pub coordinator: CoordinatorConfig,

    /// Simulated durations
    pub simulation: SimulationConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .pizzeria.yml
        let local_config = PathBuf::from(".pizzeria.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/pizzeria/pizzeria.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pizzeria").join("pizzeria.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Simulated durations of the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// How long the coordinator holds each dispatch before handing it over
    #[serde(rename = "dispatch-delay-ms")]
    pub dispatch_delay_ms: u64,

    /// How long each stage works on an order
    #[serde(rename = "stage-delay-ms")]
    pub stage_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dispatch_delay_ms: 2000,
            stage_delay_ms: 2000,
        }
    }
}

impl SimulationConfig {
    pub fn dispatch_delay(&self) -> Duration {
        Duration::from_millis(self.dispatch_delay_ms)
    }

    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.stage_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.log_level.is_none());
        assert_eq!(config.coordinator.channel_buffer, 1000);
        assert_eq!(config.simulation.dispatch_delay(), Duration::from_secs(2));
        assert_eq!(config.simulation.stage_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug

coordinator:
  channel-buffer: 64
  event-bus-capacity: 256

simulation:
  dispatch-delay-ms: 10
  stage-delay-ms: 25
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.coordinator.channel_buffer, 64);
        assert_eq!(config.coordinator.event_bus_capacity, 256);
        assert_eq!(config.simulation.dispatch_delay_ms, 10);
        assert_eq!(config.simulation.stage_delay_ms, 25);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
simulation:
  stage-delay-ms: 500
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.simulation.stage_delay_ms, 500);

        // Defaults for unspecified
        assert_eq!(config.simulation.dispatch_delay_ms, 2000);
        assert_eq!(config.coordinator, CoordinatorConfig::default());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log-level: warn\nsimulation:\n  dispatch-delay-ms: 1").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert_eq!(config.simulation.dispatch_delay_ms, 1);
        assert_eq!(
            Config::load_log_level(Some(&file.path().to_path_buf())).as_deref(),
            Some("warn")
        );
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yml");
        assert!(Config::load(Some(&missing)).is_err());
    }
}
