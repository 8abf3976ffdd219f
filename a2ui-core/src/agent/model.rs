//! The model-invocation seam
//!
//! The pipeline treats the language model as an opaque, possibly streaming
//! call: zero or more progress events followed by one final event.

use crate::telemetry::TelemetrySink;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// One event from a model invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// Intermediate output; surfaced only as a progress notification
    Progress { partial: Option<String> },
    /// Terminal event; `text` is `None` when the model produced no content
    Final { text: Option<String> },
}

impl ModelEvent {
    /// Progress event without partial content
    pub fn progress() -> Self {
        ModelEvent::Progress { partial: None }
    }

    /// Final event carrying `text`
    pub fn final_text(text: impl Into<String>) -> Self {
        ModelEvent::Final {
            text: Some(text.into()),
        }
    }

    /// Final event from content parts; empty parts are dropped and the rest
    /// joined with newlines
    pub fn final_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined: Vec<String> = parts
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        ModelEvent::Final {
            text: (!joined.is_empty()).then(|| joined.join("\n")),
        }
    }
}

/// Errors reported by a model invocation
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    #[error("Model invocation failed: {0}")]
    Invocation(String),

    #[error("Model stream failed: {0}")]
    Stream(String),

    #[error("Model invocation timed out after {0:?}")]
    Timeout(Duration),
}

/// Stream of events for one invocation
pub type ModelEventStream = Pin<Box<dyn Stream<Item = Result<ModelEvent, ModelError>> + Send>>;

/// Invokes the language model for one prompt
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Start an invocation.
    ///
    /// `telemetry` belongs to the current request; implementations record
    /// any tool calls they make into it. Dropping the returned stream must
    /// release the in-flight call.
    async fn invoke(
        &self,
        prompt: &str,
        session_id: &str,
        telemetry: &dyn TelemetrySink,
    ) -> Result<ModelEventStream, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_parts_joins_non_empty() {
        assert_eq!(
            ModelEvent::final_parts(["Here you go", "", "```a2ui"]),
            ModelEvent::final_text("Here you go\n```a2ui")
        );
        assert_eq!(
            ModelEvent::final_parts(Vec::<String>::new()),
            ModelEvent::Final { text: None }
        );
    }
}
