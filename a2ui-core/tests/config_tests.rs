//! Integration tests for configuration loading and validation

use a2ui_core::config::{
    load_from_json, load_from_yaml, ConfigError, SettingProblem, UiMode, MAX_CONFIGURED_RETRIES,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test config file
fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_full_yaml_config() {
    std::env::set_var("A2UI_TEST_SCHEMA_HOST", "schemas.example.com");

    let yaml = r##"
version: "0.1"
ui:
  mode: optional
  validate_messages: false
retry:
  max_retries: 2
schema:
  location: https://${A2UI_TEST_SCHEMA_HOST}/server_to_client.json
styles:
  primary_color: "#FF5722"
  font: Inter
messages:
  processing: Looking around...
"##;

    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(config.ui.mode, UiMode::Optional);
    assert!(!config.ui.validate_messages);
    assert_eq!(config.retry.max_retries, 2);
    assert_eq!(config.retry.max_attempts(), 3);
    assert_eq!(
        config.schema.location.as_deref(),
        Some("https://schemas.example.com/server_to_client.json")
    );
    assert_eq!(config.styles.primary_color, "#FF5722");
    assert_eq!(config.messages.processing, "Looking around...");
    assert_eq!(
        config.messages.apology,
        "I'm having trouble generating the interface right now."
    );
}

#[test]
fn test_load_json_config_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.json", r#"{"version": "0.1"}"#);

    let config = load_from_json(path).unwrap();
    assert_eq!(config.ui.mode, UiMode::Required);
    assert_eq!(config.retry.max_retries, 1);
    assert!(config.schema.location.is_none());
    assert_eq!(config.styles.font, "Roboto");
}

#[test]
fn test_env_var_fallback() {
    let yaml = r#"
version: "0.1"
styles:
  font: ${A2UI_TEST_UNSET_FONT:-Lato}
"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.yaml", yaml);

    let config = load_from_yaml(path).unwrap();
    assert_eq!(config.styles.font, "Lato");
}

#[test]
fn test_missing_env_var_is_reported() {
    let yaml = r#"
version: "0.1"
schema:
  location: ${A2UI_TEST_MISSING_LOCATION}
"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::UnsetPlaceholder { var }) => assert_eq!(var, "A2UI_TEST_MISSING_LOCATION"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = load_from_yaml(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_parse_error_has_location() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "broken.json", "{\"version\": \"0.1\",,}");

    match load_from_json(path) {
        Err(ConfigError::Malformed { line, column, .. }) => {
            assert_eq!(line, Some(1));
            assert!(column.is_some());
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_wrong_version_rejected() {
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.yaml", "version: \"2.0\"\n");

    match load_from_yaml(path) {
        Err(ConfigError::Rejected(err)) => {
            assert_eq!(err.key, "version");
            assert_eq!(
                err.problem,
                SettingProblem::UnsupportedVersion {
                    expected: "0.1".to_string(),
                    actual: "2.0".to_string(),
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_excessive_retries_rejected() {
    let yaml = r#"
version: "0.1"
retry:
  max_retries: 50
"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::Rejected(err)) => {
            assert_eq!(err.key, "retry.max_retries");
            assert_eq!(
                err.problem,
                SettingProblem::RetryBudgetTooLarge {
                    requested: 50,
                    limit: MAX_CONFIGURED_RETRIES,
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_bad_colour_rejected() {
    let yaml = r#"
version: "0.1"
styles:
  primary_color: blue
"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::Rejected(err)) => {
            assert_eq!(err.key, "styles.primary_color");
            assert_eq!(
                err.problem,
                SettingProblem::NotHexColour {
                    value: "blue".to_string()
                }
            );
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_empty_schema_location_rejected() {
    let yaml = r#"
version: "0.1"
schema:
  location: "  "
"#;
    let dir = TempDir::new().unwrap();
    let path = create_test_file(&dir, "pipeline.yaml", yaml);

    match load_from_yaml(path) {
        Err(ConfigError::Rejected(err)) => {
            assert_eq!(err.key, "schema.location");
            assert_eq!(err.problem, SettingProblem::Blank);
            assert!(err.hint.is_some());
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
