//! Configuration handling for the TUI

use crate::directory::DEFAULT_SUBMIT_DELAY;
use crate::intake::AgeRule;
use crate::state::View;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the simulated registration latency
const SUBMIT_DELAY_ENV: &str = "QUADRAGO_SUBMIT_DELAY_MS";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Simulated registration latency in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// How birth dates are turned into ages during validation
    pub age_rule: Option<AgeRule>,
    /// View shown at startup
    pub start_view: Option<View>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "quadrago", "quadrago-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get the log file path
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.data_local_dir().join("quadrago-tui.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Ok(value) = std::env::var(SUBMIT_DELAY_ENV) {
            config.apply_submit_delay_override(&value);
        }

        Ok(config)
    }

    /// Read a config file; a missing file yields the defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn apply_submit_delay_override(&mut self, value: &str) {
        match value.trim().parse::<u64>() {
            Ok(ms) => self.submit_delay_ms = Some(ms),
            Err(_) => tracing::warn!("Ignoring invalid {SUBMIT_DELAY_ENV}={value:?}"),
        }
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SUBMIT_DELAY)
    }

    pub fn age_rule(&self) -> AgeRule {
        self.age_rule.unwrap_or_default()
    }

    /// Startup view; the create form always starts from the dashboard
    pub fn start_view(&self) -> View {
        match self.start_view {
            Some(View::StudentCreate) | None => View::Dashboard,
            Some(view) => view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.submit_delay_ms.is_none());
        assert!(config.age_rule.is_none());
        assert!(config.start_view.is_none());
        assert_eq!(config.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.age_rule(), AgeRule::CalendarYear);
        assert_eq!(config.start_view(), View::Dashboard);
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            submit_delay_ms: Some(250),
            age_rule: Some(AgeRule::Exact),
            start_view: Some(View::Students),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert!(json.contains("\"exact\""));
        assert!(json.contains("\"students\""));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, TuiConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"age_rule": "calendar_year", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.age_rule, Some(AgeRule::CalendarYear));
    }

    #[test]
    fn test_submit_delay_override() {
        let mut config = TuiConfig::default();
        config.apply_submit_delay_override(" 20 ");
        assert_eq!(config.submit_delay(), Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_submit_delay_override_is_ignored() {
        let mut config = TuiConfig {
            submit_delay_ms: Some(5),
            ..Default::default()
        };
        config.apply_submit_delay_override("soon");
        assert_eq!(config.submit_delay_ms, Some(5));
    }

    #[test]
    fn test_create_view_is_not_a_start_view() {
        let config = TuiConfig {
            start_view: Some(View::StudentCreate),
            ..Default::default()
        };
        assert_eq!(config.start_view(), View::Dashboard);
    }

    #[test]
    fn test_save_then_load_from_file() {
        let name = format!("quadrago-tui-config-{}", std::process::id());
        let dir = std::env::temp_dir().join(name);
        let path = dir.join("nested").join("config.json");
        let config = TuiConfig {
            submit_delay_ms: Some(10),
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(TuiConfig::load_from(&path).unwrap(), config);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("quadrago-tui-does-not-exist.json");
        assert_eq!(TuiConfig::load_from(&path).unwrap(), TuiConfig::default());
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let name = format!("quadrago-tui-bad-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "{ not json").unwrap();
        assert!(TuiConfig::load_from(&path).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_paths_are_optional() {
        // Just test that the functions don't panic
        let _ = TuiConfig::config_path();
        let _ = TuiConfig::log_path();
    }
}
