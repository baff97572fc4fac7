//! Request validation — turns a raw request body into a [`PlanRequest`].

use serde_json::Value;
use thiserror::Error;

use crate::models::plan::PlanRequest;

/// Why a request body was rejected. Always caller-caused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body is required")]
    MissingBody,

    #[error("Request body is not valid JSON")]
    MalformedJson,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

const REQUIRED_FIELDS: [&str; 3] = ["topic", "difficulty", "timeframe"];

/// Validates a raw request body.
///
/// Fields are checked in declaration order and must be non-blank strings.
/// Values are returned exactly as sent; `difficulty` is not coerced.
pub fn parse_plan_request(body: &[u8]) -> Result<PlanRequest, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::MissingBody);
    }

    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::MalformedJson)?;

    let [topic, difficulty, timeframe] = REQUIRED_FIELDS.map(|name| required_string(&value, name));

    Ok(PlanRequest {
        topic: topic?,
        difficulty: difficulty?,
        timeframe: timeframe?,
    })
}

fn required_string(value: &Value, name: &'static str) -> Result<String, ValidationError> {
    value
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or(ValidationError::MissingField(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_body_passes_through_unmodified() {
        let body = br#"{"topic": " Rust ", "difficulty": "Expert", "timeframe": "6 weeks"}"#;
        let request = parse_plan_request(body).unwrap();

        assert_eq!(request.topic, " Rust ");
        assert_eq!(request.difficulty, "Expert");
        assert_eq!(request.timeframe, "6 weeks");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = br#"{"topic": "Go", "difficulty": "beginner", "timeframe": "2 weeks", "x": 1}"#;
        assert!(parse_plan_request(body).is_ok());
    }

    #[test]
    fn test_empty_body_is_missing() {
        assert_eq!(parse_plan_request(b""), Err(ValidationError::MissingBody));
        assert_eq!(parse_plan_request(b"  \n"), Err(ValidationError::MissingBody));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert_eq!(
            parse_plan_request(b"{topic: Rust"),
            Err(ValidationError::MalformedJson)
        );
    }

    #[test]
    fn test_each_missing_field_is_named() {
        let cases: [(&[u8], &str); 3] = [
            (br#"{"difficulty": "beginner", "timeframe": "4 weeks"}"#, "topic"),
            (br#"{"topic": "Rust", "timeframe": "4 weeks"}"#, "difficulty"),
            (br#"{"topic": "Rust", "difficulty": "beginner"}"#, "timeframe"),
        ];
        for (body, field) in cases {
            assert_eq!(
                parse_plan_request(body),
                Err(ValidationError::MissingField(field)),
                "expected {field} to be reported"
            );
        }
    }

    #[test]
    fn test_blank_or_non_string_fields_are_missing() {
        let blank = br#"{"topic": "   ", "difficulty": "beginner", "timeframe": "4 weeks"}"#;
        assert_eq!(
            parse_plan_request(blank),
            Err(ValidationError::MissingField("topic"))
        );

        let number = br#"{"topic": "Rust", "difficulty": 3, "timeframe": "4 weeks"}"#;
        assert_eq!(
            parse_plan_request(number),
            Err(ValidationError::MissingField("difficulty"))
        );
    }

    #[test]
    fn test_non_object_json_reports_first_field() {
        assert_eq!(
            parse_plan_request(b"[1, 2, 3]"),
            Err(ValidationError::MissingField("topic"))
        );
        assert_eq!(
            parse_plan_request(b"null"),
            Err(ValidationError::MissingField("topic"))
        );
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ValidationError::MissingField("timeframe");
        assert_eq!(err.to_string(), "Missing required field: timeframe");
    }
}
