//! JSON extraction from free-form model completions.
//!
//! Models frequently wrap the requested JSON in prose or markdown code
//! fences. Extraction tries, in order: a fenced code block (optionally
//! tagged `json`) containing a `{...}` span, then a greedy first-`{` to
//! last-`}` span over the whole text, then the text as-is. The candidate is
//! parsed into the typed result; there is no schema repair and no partial
//! recovery.

use crate::domain::{AppError, EvaluationResult};

/// Parse the structured evaluation out of raw completion text.
pub fn extract_evaluation(raw: &str) -> Result<EvaluationResult, AppError> {
    let candidate = json_candidate(raw);
    serde_json::from_str(candidate).map_err(|err| AppError::EvaluationParse(err.to_string()))
}

/// Locate the most plausible JSON object span in the completion text.
///
/// Falls back to the full text when no pattern matches, so the parse step
/// reports the failure instead of this function.
fn json_candidate(raw: &str) -> &str {
    if let Some(block) = fenced_block(raw)
        && let Some(span) = brace_span(block)
    {
        return span;
    }
    if let Some(span) = brace_span(raw) {
        return span;
    }
    raw
}

/// Content of the first triple-backtick fenced block, if any.
fn fenced_block(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let mut body = &raw[open + 3..];
    if let Some(rest) = body.strip_prefix("json") {
        body = rest;
    }
    let close = body.find("```")?;
    Some(&body[..close])
}

/// Greedy span from the first `{` to the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
