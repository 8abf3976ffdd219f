//! Agent module: from user query to validated UI reply
//!
//! - `model`: the language-model seam
//! - `extraction`: locating the UI block in model text
//! - `prompt`: corrective prompts between attempts
//! - `controller`: the bounded retry loop tying it together

pub mod controller;
pub mod error;
pub mod extraction;
pub mod model;
pub mod prompt;

pub use controller::{
    ResponseOutcome, RunContext, TaskUpdate, UiAgent, UiRequest, UiResponse, PAYLOAD_SEPARATOR,
};
pub use error::{AgentError, AgentResult, AttemptError};
pub use extraction::{extract_ui_block, ExtractedReply, ExtractionError, UI_BLOCK_OPEN};
pub use model::{ModelError, ModelEvent, ModelEventStream, ModelInvoker};
