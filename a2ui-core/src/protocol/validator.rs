//! Schema validation of surface-protocol messages

use super::types::{MessageKind, ServerMessage};
use crate::schema::{SchemaError, SchemaStore};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Failure of the message validation gate
#[derive(Debug, Error)]
pub enum MessageValidationError {
    /// None of the four known top-level keys is present
    #[error("Message {index} has no known A2UI message type key (keys: [{}])", .keys.join(", "))]
    UnknownMessageKind { index: usize, keys: Vec<String> },

    /// The message does not satisfy the schema of its kind
    #[error("A2UI validation error in message {index} ({kind}): {message}")]
    SchemaViolation {
        index: usize,
        kind: MessageKind,
        message: String,
    },

    /// The schema for a kind could not be obtained
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Typed messages could not be converted to JSON for validation
    #[error("Failed to serialize messages for validation: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MessageValidationError {
    /// Whether a regenerated model response could fix this failure
    pub fn is_retryable(&self) -> bool {
        !matches!(self, MessageValidationError::Schema(_))
    }
}

/// Validates candidate protocol messages against the loaded schema store
#[derive(Debug, Clone)]
pub struct MessageValidator {
    store: Arc<SchemaStore>,
}

impl MessageValidator {
    /// Create a validator over a shared store
    pub fn new(store: Arc<SchemaStore>) -> Self {
        Self { store }
    }

    /// Validate messages in order, failing on the first invalid one
    pub fn validate(&self, messages: &[Value]) -> Result<(), MessageValidationError> {
        for (index, message) in messages.iter().enumerate() {
            self.validate_one(index, message)?;
        }
        Ok(())
    }

    /// Validate typed messages by checking their serialized form
    pub fn validate_typed(&self, messages: &[ServerMessage]) -> Result<(), MessageValidationError> {
        let values = messages
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.validate(&values)
    }

    fn validate_one(&self, index: usize, message: &Value) -> Result<(), MessageValidationError> {
        let Some(kind) = detect_kind(message) else {
            let keys = message
                .as_object()
                .map(|obj| obj.keys().cloned().collect())
                .unwrap_or_default();
            return Err(MessageValidationError::UnknownMessageKind { index, keys });
        };

        let validator = self.store.message_validator(kind)?;
        if let Err(e) = validator.validate(message) {
            let diagnostic = e.to_string();
            warn!("A2UI validation error in message {} ({}): {}", index, kind, diagnostic);
            return Err(MessageValidationError::SchemaViolation {
                index,
                kind,
                message: diagnostic,
            });
        }
        Ok(())
    }
}

/// Determine a message's kind from the first known top-level key present
pub fn detect_kind(message: &Value) -> Option<MessageKind> {
    let obj = message.as_object()?;
    MessageKind::ALL
        .into_iter()
        .find(|kind| obj.contains_key(kind.key()))
}
