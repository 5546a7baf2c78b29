//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ccreport/ccreport.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `CCREPORT_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::ModelTime;
use crate::report::ReportError;

/// Raw model time for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawModelTime {
    pub start_year: Option<i32>,
    pub time_step: Option<u32>,
    pub periods: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_region: Option<String>,
    pub model_time: RawModelTime,
}

/// Unified configuration for ccreport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Region printed when none is given on the command line
    pub default_region: Option<String>,
    /// Calendar used to validate periods and map years to periods
    pub model_time: ModelTime,
}

/// Get the XDG config directory for ccreport.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ccreport").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ccreport.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReportError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ReportError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ReportError {
    ReportError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_region: overlay
                .default_region
                .clone()
                .or_else(|| self.default_region.clone()),
            model_time: ModelTime {
                start_year: overlay
                    .model_time
                    .start_year
                    .unwrap_or(self.model_time.start_year),
                time_step: overlay
                    .model_time
                    .time_step
                    .unwrap_or(self.model_time.time_step),
                periods: overlay.model_time.periods.unwrap_or(self.model_time.periods),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ReportError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ReportError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;
        current.validate()?;

        Ok(current)
    }

    /// Apply CCREPORT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ReportError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CCREPORT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("default_region") {
            settings.default_region = Some(val);
        }
        if let Ok(val) = config.get::<i32>("model_time.start_year") {
            settings.model_time.start_year = val;
        }
        if let Ok(val) = config.get::<u32>("model_time.time_step") {
            settings.model_time.time_step = val;
        }
        if let Ok(val) = config.get::<usize>("model_time.periods") {
            settings.model_time.periods = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ReportError> {
        if self.model_time.time_step == 0 {
            return Err(ReportError::Config {
                message: "model_time.time_step must be positive".to_string(),
            });
        }
        if self.model_time.periods == 0 {
            return Err(ReportError::Config {
                message: "model_time.periods must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ReportError> {
        toml::to_string_pretty(self).map_err(|e| ReportError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay: RawSettings = toml::from_str(
            r#"
default_region = "USA"
[model_time]
periods = 4
"#,
        )
        .unwrap();

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.default_region.as_deref(), Some("USA"));
        assert_eq!(merged.model_time.periods, 4);
        assert_eq!(merged.model_time.start_year, base.model_time.start_year);
        assert_eq!(merged.model_time.time_step, base.model_time.time_step);
    }

    #[test]
    fn given_zero_time_step_when_validating_then_errors() {
        let mut settings = Settings::default();
        settings.model_time.time_step = 0;
        assert!(matches!(settings.validate(), Err(ReportError::Config { .. })));
    }

    #[test]
    fn given_settings_when_rendering_toml_then_contains_model_time_section() {
        let text = Settings::default().to_toml().unwrap();
        assert!(text.contains("[model_time]"));
        assert!(text.contains("periods = 9"));
    }
}
