//! Schema store error types

use thiserror::Error;

/// Errors raised while loading or querying the protocol schema document.
///
/// Neither variant is retried: both point at a broken deployment rather than
/// a bad model response.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document is missing, unreadable, unparsable or does not compile
    #[error("Schema source error for '{location}': {message}")]
    Source { location: String, message: String },

    /// A requested schema name is absent from the loaded document
    #[error("Schema '{name}' not found in '{location}'")]
    NotFound { name: String, location: String },
}

impl SchemaError {
    /// Helper to create a source error
    pub fn source(location: impl Into<String>, message: impl Into<String>) -> Self {
        SchemaError::Source {
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
