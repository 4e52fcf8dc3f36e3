//! Pulls the JSON payload out of raw model text.

use crate::config::ExtractionConfig;
use crate::error::ParseError;
use crate::response::{parse_response, FileClassificationResponse};
use tracing::trace;

/// Returns the contents of the first ```` ```json ```` fence, else of the
/// first bare ```` ``` ```` fence, else the whole text. Always trimmed.
pub fn extract_json(text: &str) -> &str {
    let payload = if let Some((_, rest)) = text.split_once("```json") {
        trace!("extracting payload from json code fence");
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = text.split_once("```") {
        trace!("extracting payload from bare code fence");
        rest.split("```").next().unwrap_or(rest)
    } else {
        text
    };
    payload.trim()
}

/// Decodes model output and validates it as a [`FileClassificationResponse`].
pub fn parse_model_output(
    text: &str,
    config: &ExtractionConfig,
) -> Result<FileClassificationResponse, ParseError> {
    let payload = if config.strip_code_fences {
        extract_json(text)
    } else {
        text.trim()
    };
    let raw: serde_json::Value = serde_json::from_str(payload)?;
    Ok(parse_response(&raw)?)
}
