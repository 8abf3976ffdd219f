//! Agent error types

use super::extraction::ExtractionError;
use crate::protocol::MessageValidationError;
use crate::schema::SchemaError;
use crate::widget::WidgetError;
use thiserror::Error;

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Why a single model reply could not be turned into messages
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    #[error("{0}")]
    Widget(#[from] WidgetError),

    #[error("{0}")]
    Protocol(#[from] MessageValidationError),

    #[error("Failed to serialize messages: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AttemptError {
    /// Whether a regenerated model response could fix this failure
    pub fn is_retryable(&self) -> bool {
        match self {
            AttemptError::Protocol(err) => err.is_retryable(),
            _ => true,
        }
    }
}

/// Errors that end a request without a reply
#[derive(Debug, Error)]
pub enum AgentError {
    /// The schema store is unavailable; retrying the model cannot help
    #[error("Schema unavailable: {0}")]
    Schema(#[from] SchemaError),

    /// The caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Non-retryable failure of a single attempt
    #[error("Attempt failed: {0}")]
    Attempt(AttemptError),
}

impl From<AttemptError> for AgentError {
    fn from(err: AttemptError) -> Self {
        match err {
            AttemptError::Protocol(MessageValidationError::Schema(schema)) => {
                AgentError::Schema(schema)
            }
            other => AgentError::Attempt(other),
        }
    }
}
