//! Plan extraction — recovers a JSON plan object from free-form model text.
//!
//! Attempts run in order and stop at the first success:
//! 1. the whole trimmed text parses as a JSON object;
//! 2. the span from the first `{` to the last `}` parses as a JSON object.
//!
//! The parsed value is not checked against the `LearningPlan` shape.

use serde_json::Value;

/// Which attempt produced the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    Direct,
    BraceSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPlan {
    pub tier: ExtractionTier,
    pub value: Value,
}

type Attempt = fn(&str) -> Option<Value>;

const ATTEMPTS: [(ExtractionTier, Attempt); 2] = [
    (ExtractionTier::Direct, parse_whole),
    (ExtractionTier::BraceSpan, parse_brace_span),
];

/// Runs the extraction tiers over `text`. `None` means no tier produced a JSON object.
pub fn extract_plan(text: &str) -> Option<ExtractedPlan> {
    ATTEMPTS.iter().find_map(|(tier, attempt)| {
        attempt(text).map(|value| ExtractedPlan { tier: *tier, value })
    })
}

fn parse_whole(text: &str) -> Option<Value> {
    parse_object(text.trim())
}

fn parse_brace_span(text: &str) -> Option<Value> {
    brace_span(text).and_then(parse_object)
}

/// The greedy span from the first `{` through the last `}`.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

fn parse_object(candidate: &str) -> Option<Value> {
    serde_json::from_str::<Value>(candidate)
        .ok()
        .filter(Value::is_object)
}
