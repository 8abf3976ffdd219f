//! The retry controller
//!
//! One request runs up to `retry.max_retries + 1` attempts. Each attempt
//! invokes the model, extracts the UI block from its final text, parses the
//! widgets, renders them and validates the resulting messages. Recoverable
//! failures feed a corrective prompt into the next attempt; schema failures
//! end the request immediately.

use super::error::{AgentError, AgentResult, AttemptError};
use super::extraction::{extract_ui_block, has_ui_block, leading_text};
use super::model::{ModelEvent, ModelInvoker};
use super::prompt::{failure_cause, no_response_prompt, retry_prompt};
use crate::config::{PipelineConfig, UiMode};
use crate::protocol::{MessageValidator, ServerMessage};
use crate::render::TemplateRenderer;
use crate::schema::{schema_source_for, SchemaStore};
use crate::telemetry::TelemetrySink;
use crate::widget::LlmOutput;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Separates the natural-language text from the message JSON in a reply
pub const PAYLOAD_SEPARATOR: &str = "---a2ui_JSON---";

/// Characters of failed model output kept in the warning log
const FAILED_CONTENT_LOG_LIMIT: usize = 500;

/// One user request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiRequest {
    pub query: String,
    pub session_id: String,
}

impl UiRequest {
    pub fn new(query: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            session_id: session_id.into(),
        }
    }
}

/// Notifications sent while a request is in flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskUpdate {
    /// The model is still working
    Working { message: String },
    /// An attempt failed and another one follows
    Retrying { attempt: u32, reason: String },
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOutcome {
    /// Text plus validated messages
    Rendered,
    /// Plain text, accepted in optional UI mode
    TextOnly,
    /// Attempts exhausted without usable UI
    Degraded,
}

/// Final reply to a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiResponse {
    /// The reply as sent to the client
    pub content: String,
    /// Natural-language part of the reply
    pub text: String,
    /// Rendered messages; empty unless `outcome` is `Rendered`
    pub messages: Vec<ServerMessage>,
    pub outcome: ResponseOutcome,
    /// Attempts consumed, including the successful one
    pub attempts: u32,
}

impl UiResponse {
    fn rendered(text: String, messages: Vec<ServerMessage>, json: String, attempts: u32) -> Self {
        Self {
            content: format!("{}\n{}{}", text, PAYLOAD_SEPARATOR, json),
            text,
            messages,
            outcome: ResponseOutcome::Rendered,
            attempts,
        }
    }

    fn text_only(text: String, attempts: u32) -> Self {
        Self {
            content: text.clone(),
            text,
            messages: Vec::new(),
            outcome: ResponseOutcome::TextOnly,
            attempts,
        }
    }

    fn degraded(text: String, content: String, attempts: u32) -> Self {
        Self {
            content,
            text,
            messages: Vec::new(),
            outcome: ResponseOutcome::Degraded,
            attempts,
        }
    }

    /// Whether the reply carries rendered UI
    pub fn has_ui(&self) -> bool {
        self.outcome == ResponseOutcome::Rendered
    }
}

/// Per-request collaborators passed to [`UiAgent::run`]
pub struct RunContext<'a> {
    telemetry: &'a dyn TelemetrySink,
    progress: Option<mpsc::UnboundedSender<TaskUpdate>>,
    cancel: CancellationToken,
}

impl<'a> RunContext<'a> {
    pub fn new(telemetry: &'a dyn TelemetrySink) -> Self {
        Self {
            telemetry,
            progress: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Send progress notifications to `sender`
    pub fn with_progress(mut self, sender: mpsc::UnboundedSender<TaskUpdate>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Abort the request when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    fn notify(&self, update: TaskUpdate) {
        if let Some(sender) = &self.progress {
            // Receiver may be gone; progress is best-effort.
            let _ = sender.send(update);
        }
    }
}

/// A successfully processed model reply
enum Processed {
    Rendered {
        text: String,
        messages: Vec<ServerMessage>,
        json: String,
    },
    TextOnly(String),
}

/// Drives model attempts until a reply renders or the budget runs out
pub struct UiAgent {
    invoker: Arc<dyn ModelInvoker>,
    config: PipelineConfig,
    renderer: TemplateRenderer,
    validator: Option<MessageValidator>,
}

impl UiAgent {
    /// Create an agent over an already loaded schema store
    pub fn new(
        invoker: Arc<dyn ModelInvoker>,
        store: Arc<SchemaStore>,
        config: PipelineConfig,
    ) -> Self {
        let renderer = TemplateRenderer::new(&config.styles);
        let validator = config
            .ui
            .validate_messages
            .then(|| MessageValidator::new(store));
        Self {
            invoker,
            config,
            renderer,
            validator,
        }
    }

    /// Create an agent, loading the schema document named by the configuration
    pub async fn from_config(
        invoker: Arc<dyn ModelInvoker>,
        config: PipelineConfig,
    ) -> AgentResult<Self> {
        let source = schema_source_for(config.schema.location.as_deref())?;
        let store = SchemaStore::load(source.as_ref()).await?;
        Ok(Self::new(invoker, Arc::new(store), config))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    /// Answer one request
    pub async fn run(&self, request: &UiRequest, ctx: &RunContext<'_>) -> AgentResult<UiResponse> {
        let policy = &self.config.retry;
        let max_attempts = policy.max_attempts();
        let mut prompt = request.query.clone();
        let mut attempt: u32 = 0;

        loop {
            if ctx.cancel.is_cancelled() {
                return Err(AgentError::Cancelled);
            }
            attempt += 1;
            info!(
                "Attempt {}/{} for session {}",
                attempt, max_attempts, request.session_id
            );

            let reply = match self.invoke(&prompt, request, ctx).await? {
                Some(reply) => reply,
                None if policy.should_retry(attempt) => {
                    warn!(
                        "Received no final response on attempt {}. Retrying [session: {}]",
                        attempt, request.session_id
                    );
                    ctx.notify(TaskUpdate::Retrying {
                        attempt,
                        reason: "no response".to_string(),
                    });
                    prompt = no_response_prompt(&request.query);
                    continue;
                }
                None => {
                    warn!(
                        "Received no final response on final attempt {} [session: {}]",
                        attempt, request.session_id
                    );
                    self.config.messages.no_response.clone()
                }
            };

            let err = match self.process_reply(&reply) {
                Ok(Processed::Rendered {
                    text,
                    messages,
                    json,
                }) => {
                    info!(
                        "Rendered {} messages on attempt {} [session: {}]",
                        messages.len(),
                        attempt,
                        request.session_id
                    );
                    return Ok(UiResponse::rendered(text, messages, json, attempt));
                }
                Ok(Processed::TextOnly(text)) => {
                    return Ok(UiResponse::text_only(text, attempt));
                }
                Err(err) if !err.is_retryable() => {
                    error!(
                        "Non-retryable failure on attempt {}: {} [session: {}]",
                        attempt, err, request.session_id
                    );
                    return Err(err.into());
                }
                Err(err) => err,
            };

            warn!(
                "A2UI validation failed: {} (Attempt {}) [session: {}]",
                err, attempt, request.session_id
            );
            warn!(
                "Failed response content: {}",
                truncate_chars(&reply, FAILED_CONTENT_LOG_LIMIT)
            );

            if policy.should_retry(attempt) {
                let cause = failure_cause(&err);
                ctx.notify(TaskUpdate::Retrying {
                    attempt,
                    reason: cause.clone(),
                });
                prompt = retry_prompt(&cause, &request.query);
                continue;
            }

            error!(
                "Max retries exhausted after {} attempts [session: {}]",
                attempt, request.session_id
            );
            return Ok(self.exhausted(&reply, attempt));
        }
    }

    /// Turn one final reply into text and messages
    fn process_reply(&self, reply: &str) -> Result<Processed, AttemptError> {
        if self.config.ui.mode == UiMode::Optional && !has_ui_block(reply) {
            return Ok(Processed::TextOnly(reply.to_string()));
        }

        let extracted = extract_ui_block(reply)?;
        let output = LlmOutput::from_json_str(extracted.body)?;
        let messages = self.renderer.render(&output);

        if let Some(validator) = &self.validator {
            validator.validate_typed(&messages)?;
        }

        let json = serde_json::to_string(&messages)?;
        Ok(Processed::Rendered {
            text: extracted.text.trim().to_string(),
            messages,
            json,
        })
    }

    /// Degrade to the reply's natural-language part; the broken block is never shown
    fn exhausted(&self, reply: &str, attempts: u32) -> UiResponse {
        let text = leading_text(reply).to_string();
        let content = match self.config.ui.mode {
            UiMode::Required => format!("{}\n\n{}", text, self.config.messages.apology),
            UiMode::Optional => text.clone(),
        };
        UiResponse::degraded(text, content, attempts)
    }

    /// Run one model invocation and return its final text, if any.
    ///
    /// Failures of the model itself count as "no response"; only
    /// cancellation is reported as an error.
    async fn invoke(
        &self,
        prompt: &str,
        request: &UiRequest,
        ctx: &RunContext<'_>,
    ) -> AgentResult<Option<String>> {
        let started = Instant::now();
        let result = self.collect_final(prompt, request, ctx).await;
        ctx.telemetry.track_inference(started.elapsed());
        debug!(
            "Inference took {:.2} milliseconds [session: {}]",
            started.elapsed().as_secs_f64() * 1000.0,
            request.session_id
        );
        result
    }

    async fn collect_final(
        &self,
        prompt: &str,
        request: &UiRequest,
        ctx: &RunContext<'_>,
    ) -> AgentResult<Option<String>> {
        let invocation = self
            .invoker
            .invoke(prompt, &request.session_id, ctx.telemetry);
        let mut stream = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => return Err(AgentError::Cancelled),
            result = invocation => match result {
                Ok(stream) => stream,
                Err(err) => {
                    warn!("{} [session: {}]", err, request.session_id);
                    return Ok(None);
                }
            },
        };

        loop {
            let event = tokio::select! {
                biased;
                _ = ctx.cancel.cancelled() => return Err(AgentError::Cancelled),
                event = stream.next() => event,
            };

            match event {
                None => return Ok(None),
                Some(Err(err)) => {
                    warn!("{} [session: {}]", err, request.session_id);
                    return Ok(None);
                }
                Some(Ok(ModelEvent::Progress { .. })) => {
                    ctx.notify(TaskUpdate::Working {
                        message: self.config.messages.processing.clone(),
                    });
                }
                Some(Ok(ModelEvent::Final { text })) => {
                    return Ok(text.filter(|t| !t.is_empty()));
                }
            }
        }
    }
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn test_rendered_payload_layout() {
        let response = UiResponse::rendered("Here".to_string(), Vec::new(), "[]".to_string(), 1);
        assert_eq!(response.content, "Here\n---a2ui_JSON---[]");
        assert!(response.has_ui());
    }

    #[test]
    fn test_task_update_serialization() {
        let update = TaskUpdate::Working {
            message: "Finding restaurants that match your criteria...".to_string(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["state"], "working");
    }
}
