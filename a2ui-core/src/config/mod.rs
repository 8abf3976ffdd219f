//! Configuration module for the UI generation pipeline
//!
//! Configuration is read from YAML or JSON, `${VAR}` placeholders are
//! interpolated from the environment before parsing, and the result passes
//! structural and extended validation before it is handed out.

mod env;
mod error;
mod schema;
mod validator;

pub use env::{interpolate_env_vars, referenced_vars};
pub use error::{ConfigError, ConfigResult, SettingError, SettingProblem};
pub use schema::{
    MessageConfig, PipelineConfig, RetryPolicy, SchemaConfig, StyleConfig, UiConfig, UiMode,
    CONFIG_VERSION,
};
pub use validator::{ConfigValidator, MAX_CONFIGURED_RETRIES};

use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<PipelineConfig> {
    let path = path.as_ref();
    let interpolated = read_config(path)?;

    let config: PipelineConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::Malformed {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Load a configuration from a JSON file
pub fn load_from_json<P: AsRef<Path>>(path: P) -> ConfigResult<PipelineConfig> {
    let path = path.as_ref();
    let interpolated = read_config(path)?;

    let config: PipelineConfig =
        serde_json::from_str(&interpolated).map_err(|e| ConfigError::Malformed {
            path: path.to_string_lossy().to_string(),
            line: Some(e.line()),
            column: Some(e.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

/// Read a config file and resolve its `${VAR}` placeholders
fn read_config(path: &Path) -> ConfigResult<String> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    let vars = referenced_vars(&content);
    if !vars.is_empty() {
        debug!("Config {} references {}", path.display(), vars.join(", "));
    }
    interpolate_env_vars(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
version: "0.1"
ui:
  mode: optional
"#;
        let config: PipelineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ui.mode, UiMode::Optional);
        assert!(config.ui.validate_messages);
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.styles.primary_color, "#007BFF");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
version: "0.1"
retry:
  max_retries: 1
  initial_delay_ms: 100
"#;
        assert!(serde_yaml::from_str::<PipelineConfig>(yaml).is_err());
    }
}
