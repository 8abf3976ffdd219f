//! Configuration schema structures with serde support

use super::error::{SettingError, SettingProblem};
use serde::{Deserialize, Serialize};

/// Supported configuration schema version
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration for the UI generation pipeline
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// UI rendering behaviour
    #[serde(default)]
    pub ui: UiConfig,

    /// Retry budget for malformed model output
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Where the protocol schema document comes from
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Style hints sent with every surface
    #[serde(default)]
    pub styles: StyleConfig,

    /// User-facing fixed texts
    #[serde(default)]
    pub messages: MessageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            ui: UiConfig::default(),
            retry: RetryPolicy::default(),
            schema: SchemaConfig::default(),
            styles: StyleConfig::default(),
            messages: MessageConfig::default(),
        }
    }
}

/// Whether a request must produce UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiMode {
    /// Failing to produce UI ends in an apology
    #[default]
    Required,
    /// Plain-text replies are acceptable
    Optional,
}

/// UI rendering configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    #[serde(default)]
    pub mode: UiMode,

    /// Run rendered messages through the schema validator
    #[serde(default = "default_true")]
    pub validate_messages: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mode: UiMode::Required,
            validate_messages: true,
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given number of retries
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Create a policy with no retries
    pub fn no_retry() -> Self {
        Self { max_retries: 0 }
    }

    /// Total attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Whether another attempt may follow attempt number `attempt` (1-based)
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt <= self.max_retries
    }
}

/// Schema document location
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// File path or http(s) URL; the bundled document when absent
    #[serde(default)]
    pub location: Option<String>,
}

/// Style hints for `beginRendering`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            font: default_font(),
        }
    }
}

/// Fixed texts shown to the user
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MessageConfig {
    /// Progress notification while the model is working
    #[serde(default = "default_processing")]
    pub processing: String,

    /// Appended to the text when UI could not be produced
    #[serde(default = "default_apology")]
    pub apology: String,

    /// Stands in for the model text when no attempt produced a reply
    #[serde(default = "default_no_response")]
    pub no_response: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            processing: default_processing(),
            apology: default_apology(),
            no_response: default_no_response(),
        }
    }
}

// Default value functions for serde
fn default_true() -> bool { true }
fn default_max_retries() -> u32 { 1 }
fn default_primary_color() -> String { "#007BFF".to_string() }
fn default_font() -> String { "Roboto".to_string() }
fn default_processing() -> String { "Finding restaurants that match your criteria...".to_string() }
fn default_apology() -> String { "I'm having trouble generating the interface right now.".to_string() }
fn default_no_response() -> String { "I'm sorry, I encountered an error.".to_string() }

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SettingError> {
        if self.version.is_empty() {
            return Err(SettingError::blank("version"));
        }

        if self.version != CONFIG_VERSION {
            return Err(SettingError::new(
                "version",
                SettingProblem::UnsupportedVersion {
                    expected: CONFIG_VERSION.to_string(),
                    actual: self.version.clone(),
                },
            ));
        }

        if let Some(location) = &self.schema.location {
            if location.trim().is_empty() {
                return Err(SettingError::blank("schema.location")
                    .with_hint("Omit the field to use the bundled schema"));
            }
        }

        if self.styles.font.is_empty() {
            return Err(SettingError::blank("styles.font"));
        }

        if self.messages.apology.trim().is_empty() {
            return Err(SettingError::blank("messages.apology"));
        }

        Ok(())
    }
}
