//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use schedulr_infra::config;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "database": {
            "path": "/tmp/integration_test.db",
            "pool_size": 10
        },
        "scheduling": {
            "max_range_days": 14,
            "horizon_days": 120,
            "upcoming_window_days": 7,
            "default_timezone": "America/Chicago"
        },
        "logging": {
            "json": true
        }
    }"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("json");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let config = config::load_from_file(Some(path.clone())).expect("config loads from JSON");

    assert_eq!(config.database.path, "/tmp/integration_test.db");
    assert_eq!(config.database.pool_size, 10);
    assert_eq!(config.scheduling.max_range_days, 14);
    assert_eq!(config.scheduling.horizon_days, 120);
    assert_eq!(config.scheduling.upcoming_window_days, 7);
    assert_eq!(config.scheduling.default_timezone, "America/Chicago");
    assert!(config.logging.json);
    config.validate().expect("loaded config is valid");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_partial_toml_file_falls_back_to_defaults() {
    let toml_content = r#"
[database]
path = "/tmp/integration_test_toml.db"
"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let config = config::load_from_file(Some(path.clone())).expect("config loads from TOML");
    assert_eq!(config.database.path, "/tmp/integration_test_toml.db");
    assert_eq!(config.database.pool_size, 8);
    assert_eq!(config.scheduling.max_range_days, 7);
    assert_eq!(config.scheduling.horizon_days, 90);
    assert!(!config.logging.json);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(b"[database\npath = ").expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let err = config::load_from_file(Some(path.clone())).unwrap_err();
    assert!(matches!(err, schedulr_domain::SchedulrError::Config(_)));

    std::fs::remove_file(path).ok();
}
