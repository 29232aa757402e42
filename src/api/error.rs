//! Failure types of the HTTP layer and the normalizer that turns any of them
//! into a single line for the user.
//!
//! The backend speaks several error dialects:
//!
//! ```text
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "...", "details": {...} } }
//! { "detail": "..." }
//! { "release_year": ["This field is required."] }
//! ["first problem", "second problem"]
//! ```
//!
//! [`error_message`] picks the most specific text it can find, [`error_code`]
//! only looks at the envelope's `code`.

use serde_json::Value;
use thiserror::Error;

/// Code the backend uses for missing entities.
pub const NOT_FOUND: &str = "NOT_FOUND";

const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
const VALIDATION_FALLBACK: &str = "Please check your input and try again";
const GENERIC_FALLBACK: &str = "Failed to process request. Please try again later.";

/// Errors produced by [`ApiClient`](super::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<Value> },

    /// The request never produced a response (DNS, refused, timeout, ...)
    #[error("{0}")]
    Transport(String),

    /// The response body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A URL could not be built from the configured base
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Response body plus transport-level message of a failed request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPayload<'a> {
    pub body: Option<&'a Value>,
    pub message: Option<&'a str>,
}

impl<'a> ErrorPayload<'a> {
    pub fn new(body: Option<&'a Value>, message: Option<&'a str>) -> Self {
        Self { body, message }
    }
}

/// What a view keeps after a failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchFailure {
    pub message: String,
    pub code: Option<String>,
}

impl FetchFailure {
    pub fn is_not_found(&self) -> bool {
        self.code.as_deref() == Some(NOT_FOUND)
    }
}

impl From<&ApiError> for FetchFailure {
    fn from(error: &ApiError) -> Self {
        let transport = error.to_string();
        let body = match error {
            ApiError::Status { body, .. } => body.as_ref(),
            _ => None,
        };
        let payload = ErrorPayload::new(body, Some(&transport));
        FetchFailure {
            message: error_message(&payload),
            code: error_code(&payload),
        }
    }
}

impl From<ApiError> for FetchFailure {
    fn from(error: ApiError) -> Self {
        FetchFailure::from(&error)
    }
}

/// Resolves the human readable message of a failed request.
pub fn error_message(payload: &ErrorPayload<'_>) -> String {
    if let Some(message) = payload.body.and_then(message_from_body) {
        return message;
    }

    match payload.message {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => GENERIC_FALLBACK.to_string(),
    }
}

/// The envelope's machine readable code, if any.
pub fn error_code(payload: &ErrorPayload<'_>) -> Option<String> {
    payload
        .body?
        .get("error")?
        .get("code")
        .filter(|code| truthy(code))
        .map(text)
}

fn message_from_body(body: &Value) -> Option<String> {
    if let Some(envelope) = body.get("error").filter(|e| e.is_object()) {
        let code = envelope.get("code").and_then(Value::as_str);
        if code == Some(VALIDATION_ERROR) {
            if let Some(details) = envelope.get("details").filter(|d| truthy(d)) {
                let lines = flatten_details(details);
                if !lines.is_empty() {
                    return Some(lines.join(". "));
                }
                return Some(
                    envelope
                        .get("message")
                        .filter(|m| truthy(m))
                        .map(text)
                        .unwrap_or_else(|| VALIDATION_FALLBACK.to_string()),
                );
            }
        }

        if let Some(message) = envelope.get("message").filter(|m| truthy(m)) {
            return Some(text(message));
        }
    }

    if let Some(detail) = body.get("detail").filter(|d| truthy(d)) {
        return Some(text(detail));
    }

    match body {
        Value::Array(items) => Some(items.iter().map(text).collect::<Vec<_>>().join(", ")),
        Value::Object(fields) => {
            let (key, value) = fields.iter().next()?;
            if !truthy(value) {
                return None;
            }
            match value {
                Value::Array(items) => items
                    .first()
                    .map(|first| format!("{}: {}", humanize_field(key), text(first))),
                other => Some(format!("{}: {}", key, text(other))),
            }
        }
        Value::String(raw) => Some(raw.clone()),
        _ => None,
    }
}

fn flatten_details(details: &Value) -> Vec<String> {
    match details {
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(field, errors)| {
                let label = humanize_field(field);
                let errors = match errors {
                    Value::Array(items) => items.clone(),
                    single => vec![single.clone()],
                };
                errors
                    .into_iter()
                    .map(move |error| format!("{}: {}", label, text(&error)))
            })
            .collect(),
        Value::Array(items) => items.iter().map(text).collect(),
        _ => Vec::new(),
    }
}

/// `release_year` -> `Release Year`
pub fn humanize_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut at_word_start = true;
    for c in field.chars() {
        let c = if c == '_' { ' ' } else { c };
        let is_word = c.is_alphanumeric();
        if is_word && at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word;
    }
    out
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn from_body(body: Value) -> (String, Option<String>) {
        let payload = ErrorPayload::new(Some(&body), Some("Request failed with status code 400"));
        (error_message(&payload), error_code(&payload))
    }

    #[test]
    fn envelope_message_and_code() {
        let (message, code) = from_body(json!({ "error": { "code": "NOT_FOUND", "message": "x" } }));
        assert_eq!(message, "x");
        assert_eq!(code.as_deref(), Some("NOT_FOUND"));
    }

    #[test]
    fn framework_detail_has_no_code() {
        let (message, code) = from_body(json!({ "detail": "y" }));
        assert_eq!(message, "y");
        assert_eq!(code, None);
    }

    #[test]
    fn field_errors_are_humanized() {
        let (message, _) = from_body(json!({ "release_year": ["This field is required."] }));
        assert_eq!(message, "Release Year: This field is required.");
    }

    #[test]
    fn validation_details_are_flattened() {
        let (message, code) = from_body(json!({
            "success": false,
            "error": {
                "code": "VALIDATION_ERROR",
                "message": "Invalid input data",
                "details": {
                    "release_year": ["Ensure this value is greater than or equal to 1888."],
                    "title": ["This field may not be blank.", "Too short."]
                }
            }
        }));
        assert_eq!(
            message,
            "Release Year: Ensure this value is greater than or equal to 1888.. \
             Title: This field may not be blank.. Title: Too short."
        );
        assert_eq!(code.as_deref(), Some("VALIDATION_ERROR"));
    }

    #[test]
    fn validation_details_as_list() {
        let (message, _) = from_body(json!({
            "error": { "code": "VALIDATION_ERROR", "details": ["a", "b"] }
        }));
        assert_eq!(message, "a. b");
    }

    #[test]
    fn empty_validation_details_fall_back_to_message() {
        let (message, _) = from_body(json!({
            "error": { "code": "VALIDATION_ERROR", "message": "Invalid input data", "details": {} }
        }));
        assert_eq!(message, "Invalid input data");

        let (message, _) = from_body(json!({
            "error": { "code": "VALIDATION_ERROR", "details": {} }
        }));
        assert_eq!(message, VALIDATION_FALLBACK);
    }

    #[test]
    fn array_body_is_joined() {
        let (message, _) = from_body(json!(["one", "two"]));
        assert_eq!(message, "one, two");
    }

    #[test]
    fn scalar_field_keeps_raw_key() {
        let (message, _) = from_body(json!({ "non_field": "broken" }));
        assert_eq!(message, "non_field: broken");
    }

    #[test]
    fn string_body_is_verbatim() {
        let (message, _) = from_body(json!("Bad Gateway"));
        assert_eq!(message, "Bad Gateway");
    }

    #[test]
    fn empty_object_uses_transport_message() {
        let (message, _) = from_body(json!({}));
        assert_eq!(message, "Request failed with status code 400");
    }

    #[test]
    fn network_error_uses_transport_message() {
        let error = ApiError::Transport("Network Error".to_string());
        let failure = FetchFailure::from(&error);
        assert_eq!(failure.message, "Network Error");
        assert_eq!(failure.code, None);
    }

    #[test]
    fn nothing_known_uses_fallback() {
        assert_eq!(error_message(&ErrorPayload::default()), GENERIC_FALLBACK);
    }

    #[test]
    fn status_error_carries_not_found() {
        let error = ApiError::Status {
            status: 404,
            body: Some(json!({
                "success": false,
                "error": { "code": "NOT_FOUND", "message": "Requested resource was not found" }
            })),
        };
        let failure = FetchFailure::from(error);
        assert!(failure.is_not_found());
        assert_eq!(failure.message, "Requested resource was not found");
    }

    #[test]
    fn humanizes_each_word() {
        assert_eq!(humanize_field("date_of_birth"), "Date Of Birth");
        assert_eq!(humanize_field("name"), "Name");
    }
}
