use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use dashboard_engine::TransportSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";
/// Overrides `api_base` from the config file.
pub const API_BASE_ENV: &str = "DASHBOARD_API_BASE";

const DEFAULT_CONFIG_FILE: &str = "dashboard.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    /// Unset means no connect timeout.
    pub connect_timeout_secs: Option<u64>,
    /// Unset means a hung request keeps the ETL control disabled until it resolves.
    pub request_timeout_secs: Option<u64>,
    /// Re-probe health on this interval; unset probes once at startup.
    pub health_interval_secs: Option<u64>,
    pub log_destination: LogDestination,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: TransportSettings::default().api_base,
            connect_timeout_secs: None,
            request_timeout_secs: None,
            health_interval_secs: None,
            log_destination: LogDestination::default(),
        }
    }
}

impl DashboardConfig {
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            api_base: self.api_base.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn health_interval(&self) -> Option<Duration> {
        self.health_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Reads the config file (defaults when it does not exist) and applies the
/// environment override for the API base.
pub fn load_config(path: &Path) -> anyhow::Result<DashboardConfig> {
    let mut config = read_config_file(path)?;
    apply_api_base_override(&mut config, std::env::var(API_BASE_ENV).ok());
    Ok(config)
}

fn read_config_file(path: &Path) -> anyhow::Result<DashboardConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(DashboardConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    ron::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

fn apply_api_base_override(config: &mut DashboardConfig, value: Option<String>) {
    if let Some(api_base) = value.filter(|value| !value.trim().is_empty()) {
        config.api_base = api_base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = read_config_file(&temp.path().join("absent.ron")).unwrap();

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.health_interval(), None);
        assert_eq!(config.transport_settings().request_timeout, None);
    }

    #[test]
    fn partial_file_keeps_defaults_for_other_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dashboard.ron");
        fs::write(
            &path,
            r#"(api_base: "http://etl.internal/api", request_timeout_secs: Some(30), log_destination: Both)"#,
        )
        .unwrap();

        let config = read_config_file(&path).unwrap();

        assert_eq!(config.api_base, "http://etl.internal/api");
        assert_eq!(
            config.transport_settings().request_timeout,
            Some(Duration::from_secs(30))
        );
        assert_eq!(config.transport_settings().connect_timeout, None);
        assert_eq!(config.log_destination, LogDestination::Both);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dashboard.ron");
        fs::write(&path, "(api_base: 42").unwrap();

        let err = read_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn zero_health_interval_disables_timer() {
        let config = DashboardConfig {
            health_interval_secs: Some(0),
            ..DashboardConfig::default()
        };
        assert_eq!(config.health_interval(), None);

        let config = DashboardConfig {
            health_interval_secs: Some(15),
            ..DashboardConfig::default()
        };
        assert_eq!(config.health_interval(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn api_base_override_ignores_blank_values() {
        let mut config = DashboardConfig::default();
        apply_api_base_override(&mut config, Some("   ".to_string()));
        assert_eq!(config.api_base, "http://localhost:8000");

        apply_api_base_override(&mut config, Some("http://10.0.0.5:8000".to_string()));
        assert_eq!(config.api_base, "http://10.0.0.5:8000");

        apply_api_base_override(&mut config, None);
        assert_eq!(config.api_base, "http://10.0.0.5:8000");
    }
}
