//! Widget parsing errors

use super::WidgetKind;
use thiserror::Error;

/// Errors turning model output into typed widgets.
///
/// All variants are recoverable: a regenerated model response can fix them.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The body is not JSON of the shape `{"widgets": [{"type", "data"}]}`
    #[error("UI payload does not match the LLMOutput schema: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A widget `type` outside the closed set
    #[error("Widget {index} has unknown type '{kind}'")]
    UnknownKind { index: usize, kind: String },

    /// Widget `data` does not match the structure its kind requires
    #[error("Widget {index} ({kind}) has invalid data: {source}")]
    Data {
        index: usize,
        kind: WidgetKind,
        #[source]
        source: serde_json::Error,
    },
}
