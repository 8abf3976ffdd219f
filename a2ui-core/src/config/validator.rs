//! Configuration validation utilities

use super::error::{SettingError, SettingProblem};
use super::schema::PipelineConfig;
use regex::Regex;

/// Upper bound on configured retries; each retry is a full model round-trip
pub const MAX_CONFIGURED_RETRIES: u32 = 5;

/// Configuration validator with rules beyond the structural checks
pub struct ConfigValidator {
    /// `#RRGGBB` colour pattern
    color_pattern: Regex,
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    pub fn new() -> Self {
        Self {
            color_pattern: Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("colour pattern must compile"),
        }
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &PipelineConfig) -> Result<(), SettingError> {
        // First run the built-in validation
        config.validate()?;

        self.validate_retry(config)?;
        self.validate_styles(config)?;
        self.validate_schema_location(config)?;

        Ok(())
    }

    fn validate_retry(&self, config: &PipelineConfig) -> Result<(), SettingError> {
        if config.retry.max_retries > MAX_CONFIGURED_RETRIES {
            return Err(SettingError::new(
                "retry.max_retries",
                SettingProblem::RetryBudgetTooLarge {
                    requested: config.retry.max_retries,
                    limit: MAX_CONFIGURED_RETRIES,
                },
            ));
        }
        Ok(())
    }

    fn validate_styles(&self, config: &PipelineConfig) -> Result<(), SettingError> {
        if !self.is_hex_color(&config.styles.primary_color) {
            return Err(SettingError::new(
                "styles.primary_color",
                SettingProblem::NotHexColour {
                    value: config.styles.primary_color.clone(),
                },
            ));
        }
        Ok(())
    }

    /// Remote locations must be http(s); anything that is not a URL is a path
    fn validate_schema_location(&self, config: &PipelineConfig) -> Result<(), SettingError> {
        let Some(location) = &config.schema.location else {
            return Ok(());
        };

        if let Ok(url) = url::Url::parse(location) {
            match url.scheme() {
                "http" | "https" | "file" => {}
                // Windows drive letters parse as one-letter schemes
                scheme if scheme.len() == 1 => {}
                scheme => {
                    return Err(SettingError::new(
                        "schema.location",
                        SettingProblem::UnsupportedSchemaScheme {
                            scheme: scheme.to_string(),
                        },
                    ));
                }
            }
        }
        Ok(())
    }

    /// Check a `#RRGGBB` colour value
    pub fn is_hex_color(&self, value: &str) -> bool {
        self.color_pattern.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_detection() {
        let validator = ConfigValidator::new();

        assert!(validator.is_hex_color("#007BFF"));
        assert!(validator.is_hex_color("#abcdef"));

        assert!(!validator.is_hex_color("007BFF"));
        assert!(!validator.is_hex_color("#07F"));
        assert!(!validator.is_hex_color("blue"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::new().validate(&PipelineConfig::default()).is_ok());
    }

    #[test]
    fn test_retry_upper_bound() {
        let mut config = PipelineConfig::default();
        config.retry.max_retries = MAX_CONFIGURED_RETRIES + 1;
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert_eq!(err.key, "retry.max_retries");
        assert_eq!(
            err.problem,
            SettingProblem::RetryBudgetTooLarge {
                requested: MAX_CONFIGURED_RETRIES + 1,
                limit: MAX_CONFIGURED_RETRIES,
            }
        );
    }

    #[test]
    fn test_schema_location_schemes() {
        let validator = ConfigValidator::new();
        let mut config = PipelineConfig::default();

        config.schema.location = Some("https://example.com/schema.json".to_string());
        assert!(validator.validate(&config).is_ok());

        config.schema.location = Some("./schemas/server_to_client.json".to_string());
        assert!(validator.validate(&config).is_ok());

        config.schema.location = Some("ftp://example.com/schema.json".to_string());
        let err = validator.validate(&config).unwrap_err();
        assert_eq!(
            err.problem,
            SettingProblem::UnsupportedSchemaScheme {
                scheme: "ftp".to_string()
            }
        );
    }
}
