//! Corrective prompts used between attempts

use super::extraction::UI_BLOCK_OPEN;

/// Prompt for the next attempt after a malformed reply
pub fn retry_prompt(cause: &str, query: &str) -> String {
    format!(
        "Your previous response had an issue: {cause} \
         You MUST produce a JSON block between {UI_BLOCK_OPEN} and ``` \
         that conforms to the LLMOutput schema. Retry for original query: '{query}'"
    )
}

/// Prompt for the next attempt after an attempt produced no final response
pub fn no_response_prompt(query: &str) -> String {
    format!("No response. Please retry: '{query}'")
}

/// Human-readable cause of a failed attempt, as quoted in [`retry_prompt`]
pub fn failure_cause(error: &impl std::fmt::Display) -> String {
    format!("Output format error: {error}.")
}
