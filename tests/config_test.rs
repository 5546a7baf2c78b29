//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Note: These tests run without controlling the global config, so they only
//! assert on fields set by the explicit file or environment.

use std::fs;

use tempfile::TempDir;

use ccreport::config::Settings;
use ccreport::report::ReportError;

#[test]
fn given_explicit_config_file_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ccreport.toml");
    fs::write(
        &path,
        r#"
default_region = "USA"

[model_time]
start_year = 1990
time_step = 5
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.default_region.as_deref(), Some("USA"));
    assert_eq!(settings.model_time.start_year, 1990);
    assert_eq!(settings.model_time.time_step, 5);
}

#[test]
fn given_missing_explicit_config_when_load_then_errors() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load(Some(&dir.path().join("missing.toml")));
    assert!(matches!(result, Err(ReportError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_then_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "default_region = [").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ReportError::Config { message }) if message.contains("parse")));
}

#[test]
fn given_zero_time_step_in_file_when_load_then_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zero.toml");
    fs::write(&path, "[model_time]\ntime_step = 0\n").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn given_env_override_when_load_then_env_wins() {
    // Arrange
    std::env::set_var("CCREPORT_MODEL_TIME__PERIODS", "21");

    // Act
    let settings = Settings::load(None);
    std::env::remove_var("CCREPORT_MODEL_TIME__PERIODS");

    // Assert
    assert_eq!(settings.unwrap().model_time.periods, 21);
}
