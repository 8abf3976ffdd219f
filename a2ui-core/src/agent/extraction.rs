//! Extraction of the fenced UI payload from free-form model text

use thiserror::Error;

/// Opening fence of the UI payload block
pub const UI_BLOCK_OPEN: &str = "```a2ui";
/// Closing fence
pub const FENCE: &str = "```";

/// The model reply did not carry a usable UI block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("A2UI block not found.")]
    BlockNotFound,

    #[error("A2UI JSON part is empty.")]
    EmptyBlock,

    #[error("Expected exactly one A2UI block, found {0}.")]
    MultipleBlocks(usize),
}

/// A reply split around its UI block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedReply<'a> {
    /// Natural-language text before the block
    pub text: &'a str,
    /// JSON body between the fences
    pub body: &'a str,
}

/// Split `reply` into its leading text and the JSON body of its UI block.
///
/// A block without a closing fence runs to the end of the reply.
pub fn extract_ui_block(reply: &str) -> Result<ExtractedReply<'_>, ExtractionError> {
    let count = reply.matches(UI_BLOCK_OPEN).count();
    if count > 1 {
        return Err(ExtractionError::MultipleBlocks(count));
    }

    let (text, rest) = reply
        .split_once(UI_BLOCK_OPEN)
        .ok_or(ExtractionError::BlockNotFound)?;
    let body = rest.split_once(FENCE).map_or(rest, |(body, _)| body);

    if body.trim().is_empty() {
        return Err(ExtractionError::EmptyBlock);
    }

    Ok(ExtractedReply { text, body })
}

/// Whether `reply` contains a UI block opener at all
pub fn has_ui_block(reply: &str) -> bool {
    reply.contains(UI_BLOCK_OPEN)
}

/// The natural-language part of a reply: everything before the first UI
/// block, or the whole reply when there is none
pub fn leading_text(reply: &str) -> &str {
    reply
        .split_once(UI_BLOCK_OPEN)
        .map_or(reply, |(text, _)| text)
}
