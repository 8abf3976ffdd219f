//! Pipeline configuration errors

use std::fmt;
use thiserror::Error;

/// Why a pipeline configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read pipeline config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed pipeline config '{path}' at line {}, column {}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    Malformed {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Rejected pipeline setting {0}")]
    Rejected(#[from] SettingError),

    #[error("Config placeholder '${{{var}}}' has no value and no fallback")]
    UnsetPlaceholder { var: String },
}

/// A single rejected setting, addressed by its dotted key (e.g. `retry.max_retries`)
#[derive(Debug, Error)]
pub struct SettingError {
    pub key: String,
    pub problem: SettingProblem,
    /// What the operator can do about it
    pub hint: Option<String>,
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.key, self.problem)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({})", hint)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingProblem {
    #[error("must not be empty")]
    Blank,

    #[error("config version {actual} is not supported (expected {expected})")]
    UnsupportedVersion { expected: String, actual: String },

    #[error("{requested} retries exceeds the limit of {limit} model round-trips")]
    RetryBudgetTooLarge { requested: u32, limit: u32 },

    #[error("'{value}' is not a #RRGGBB colour")]
    NotHexColour { value: String },

    #[error("schema location scheme '{scheme}' is not http, https or file")]
    UnsupportedSchemaScheme { scheme: String },
}

impl SettingError {
    pub fn new(key: impl Into<String>, problem: SettingProblem) -> Self {
        Self {
            key: key.into(),
            problem,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn blank(key: impl Into<String>) -> Self {
        Self::new(key, SettingProblem::Blank)
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
