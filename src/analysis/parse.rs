// src/analysis/parse.rs
//! Structured-output parsing: fence stripping plus record decoding.
//!
//! Models are told to answer with bare JSON, but some decorate the payload
//! with a markdown fence anyway. Both the server (when reading the model) and
//! the client (when reading the server, defensively) strip that wrapper
//! before parsing. Free prose outside a fence is not defended against.

use super::types::{AnalysisError, AnalysisRecord};

/// Remove a leading/trailing ``` fence, with an optional `json` format tag,
/// from around a structured payload. Input without a fence passes through
/// trimmed but otherwise untouched.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let inner = trimmed
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```");
    inner.trim()
}

/// Parse a raw backend payload into a record. Malformed JSON after stripping
/// is a distinct, surfaced error - never coerced to an empty record.
pub fn parse_record(raw: &str) -> Result<AnalysisRecord, AnalysisError> {
    let payload = strip_code_fence(raw);
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    let object = value.as_object().ok_or_else(|| {
        AnalysisError::MalformedResponse("response is valid JSON but not an object".to_string())
    })?;

    Ok(AnalysisRecord::from_json_object(object))
}
