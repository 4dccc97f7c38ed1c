//! Configuration
//!
//! Settings can be read from TOML, YAML or JSON files (chosen by extension)
//! and overridden from the environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analytics::{AlertConfig, DEFAULT_ALERT_THRESHOLD};
use crate::error::{Error, Result};
use crate::temporal::{Period, DEFAULT_UNIT};
use crate::time_series::ModelKind;

/// Environment variable overriding [`EnergyConfig::alert_threshold`]
pub const ENV_ALERT_THRESHOLD: &str = "ENERTS_ALERT_THRESHOLD";

/// Environment variable overriding [`EnergyConfig::data_file`]
pub const ENV_DATA_FILE: &str = "ENERTS_DATA_FILE";

/// Process-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Consumption level above which alerts are raised
    pub alert_threshold: f64,
    /// Unit attached to consumption records
    pub unit: String,
    /// View label (`daily`, `weekly` or `monthly`)
    pub default_period: String,
    /// Model name (`statistical` or `trend_heuristic`)
    pub default_model: String,
    /// Forecast horizon
    pub forecast_steps: usize,
    /// CSV file with `timestamp,consumption` rows
    pub data_file: Option<PathBuf>,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        EnergyConfig {
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            unit: DEFAULT_UNIT.to_string(),
            default_period: "daily".to_string(),
            default_model: "statistical".to_string(),
            forecast_steps: 10,
            data_file: None,
        }
    }
}

/// `<config dir>/enerts/config.toml`, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("enerts").join("config.toml"))
}

impl EnergyConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Config(format!("invalid JSON: {}", e)))
    }

    /// Load from a file, picking the format from its extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let config = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => {
                return Err(Error::Config(format!(
                    "unsupported configuration format: {}",
                    path.display()
                )))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the default config file if present, then the
    /// environment
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => {
                log::info!("loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides looked up by variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ALERT_THRESHOLD) {
            self.alert_threshold = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a number, got {:?}", ENV_ALERT_THRESHOLD, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_DATA_FILE) {
            self.data_file = Some(PathBuf::from(raw));
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        AlertConfig::new(self.alert_threshold)
            .map_err(|_| Error::Config(format!(
                "alert_threshold must be positive, got {}",
                self.alert_threshold
            )))?;
        if self.forecast_steps == 0 {
            return Err(Error::Config("forecast_steps must be positive, got 0".to_string()));
        }
        self.period()?;
        self.model_kind()?;
        Ok(())
    }

    /// Bucket width for the configured view
    pub fn period(&self) -> Result<Period> {
        Period::from_view_label(&self.default_period)
    }

    pub fn model_kind(&self) -> Result<ModelKind> {
        self.default_model.parse()
    }

    pub fn alert_config(&self) -> Result<AlertConfig> {
        AlertConfig::new(self.alert_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EnergyConfig::default();
        assert_eq!(config.alert_threshold, 90.0);
        assert_eq!(config.period().unwrap(), Period::Hourly);
        assert_eq!(config.model_kind().unwrap(), ModelKind::Statistical);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EnergyConfig::from_toml_str("alert_threshold = 120.0\ndefault_model = \"lstm\"\n")
            .unwrap();
        assert_eq!(config.alert_threshold, 120.0);
        assert_eq!(config.model_kind().unwrap(), ModelKind::TrendHeuristic);
        assert_eq!(config.forecast_steps, 10);
    }

    #[test]
    fn test_yaml_and_json() {
        let yaml = EnergyConfig::from_yaml_str("default_period: monthly\nunit: MWh\n").unwrap();
        assert_eq!(yaml.period().unwrap(), Period::Weekly);
        assert_eq!(yaml.unit, "MWh");

        let json = EnergyConfig::from_json_str(r#"{"forecast_steps": 24}"#).unwrap();
        assert_eq!(json.forecast_steps, 24);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = EnergyConfig::default();
        config.default_period = "hourly".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidPeriod(_))));

        let mut config = EnergyConfig::default();
        config.alert_threshold = -1.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ALERT_THRESHOLD, "75.5"),
            (ENV_DATA_FILE, "/tmp/readings.csv"),
        ]
        .into_iter()
        .collect();

        let mut config = EnergyConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.alert_threshold, 75.5);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/readings.csv")));

        let mut config = EnergyConfig::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_ALERT_THRESHOLD).then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yml");
        fs::write(&path, "alert_threshold: 60\n").unwrap();
        assert_eq!(EnergyConfig::from_file(&path).unwrap().alert_threshold, 60.0);

        let bad = dir.path().join("settings.ini");
        fs::write(&bad, "x=1").unwrap();
        assert!(matches!(EnergyConfig::from_file(&bad), Err(Error::Config(_))));
    }
}
