//! A2UI Core Library
//!
//! Turns free-form language-model replies into validated A2UI surface
//! messages for a restaurant-finder assistant. The model answers with text
//! and a fenced JSON block naming high-level widgets; this crate extracts the
//! block, expands each widget into protocol messages through fixed
//! templates, validates every message against the protocol schema and
//! retries the model with a corrective prompt when any step fails.

pub mod agent;
pub mod config;
pub mod protocol;
pub mod render;
pub mod schema;
pub mod telemetry;
pub mod widget;

pub use agent::{
    AgentError, ModelEvent, ModelInvoker, ResponseOutcome, RunContext, TaskUpdate, UiAgent,
    UiRequest, UiResponse,
};
pub use config::PipelineConfig;
pub use protocol::{MessageValidator, ServerMessage};
pub use render::TemplateRenderer;
pub use schema::SchemaStore;
pub use telemetry::{RequestStats, TelemetrySink};
pub use widget::{LlmOutput, Widget, WidgetKind};

/// Returns the version of the A2UI Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
