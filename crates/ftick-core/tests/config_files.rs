//! Loading ticker configuration from files on disk.

use std::fs;
use std::time::Duration;

use ftick_core::{ConfigError, TickerConfig};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn toml_file_overrides_selected_fields() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "ftick.toml",
        "speed = 12.0\ngap = 4.0\nwindow_count = 2\nplaceholder = \"SYNCING…\"\n",
    );
    let config = TickerConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.speed, 12.0);
    assert_eq!(config.gap, 4.0);
    assert_eq!(config.window_count, 2);
    assert_eq!(config.placeholder, "SYNCING…");
    assert_eq!(config.repeats, TickerConfig::default().repeats);
}

#[test]
fn json_file_with_step_cap() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "ftick.json",
        r#"{ "speed": 25.0, "max_step_secs": 0.25 }"#,
    );
    let config = TickerConfig::from_json_file(&path).unwrap();
    assert_eq!(config.speed, 25.0);
    assert_eq!(config.max_step_secs, Some(0.25));
    assert_eq!(
        config.motion_params().max_step,
        Some(Duration::from_millis(250))
    );
}

#[test]
fn from_file_dispatches_on_extension() {
    let dir = TempDir::new().unwrap();
    let json = write(&dir, "a.JSON", r#"{ "gap": 6.0 }"#);
    let toml = write(&dir, "a.conf", "gap = 7.0\n");
    assert_eq!(TickerConfig::from_file(&json).unwrap().gap, 6.0);
    assert_eq!(TickerConfig::from_file(&toml).unwrap().gap, 7.0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = TickerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)), "{err:?}");
}

#[test]
fn invalid_values_are_rejected_after_parsing() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.toml", "speed = -3.0\nrepeats = 0\n");
    match TickerConfig::from_toml_file(&path) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("speed")));
            assert!(errors.iter().any(|e| e.contains("repeats")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn malformed_files_report_parse_errors() {
    let dir = TempDir::new().unwrap();
    let toml = write(&dir, "broken.toml", "speed = = 1\n");
    let json = write(&dir, "broken.json", "{ \"speed\": }");
    assert!(matches!(
        TickerConfig::from_file(&toml),
        Err(ConfigError::Toml(_))
    ));
    assert!(matches!(
        TickerConfig::from_file(&json),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn wrong_field_type_is_a_parse_error() {
    let err = TickerConfig::from_toml_str("window_count = \"three\"\n").unwrap_err();
    assert!(err.to_string().starts_with("TOML parse error"), "{err}");
}
