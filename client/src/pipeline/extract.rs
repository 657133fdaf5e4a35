//! Error-body extraction for rejected submissions.
//!
//! The accounts API answers failures with one of two body shapes:
//!
//! ```text
//! {"errors": {"json": {"email": ["Not a valid email address."]}}}   field errors
//! {"message": "Invalid code"}                                       plain message
//! ```
//!
//! The shape is detected from the body itself, never from the endpoint that
//! produced it.

use std::fmt;

use serde_json::Value;

use crate::transport::HttpResponse;

/// The user-facing part of a rejection body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerError {
    /// First entry of `errors.json`: field name and its first message.
    Field { key: String, message: String },
    /// Top-level `message`.
    Message(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Field { key, message } if message.is_empty() => write!(f, "{}", key),
            ServerError::Field { key, message } => write!(f, "{} - {}", key, message),
            ServerError::Message(message) => write!(f, "{}", message),
        }
    }
}

/// Pick the error out of a response body, whichever shape it has.
///
/// Field errors take precedence when both shapes are present. A field
/// listed without any message gives way to a top-level `message`, or is
/// reported by name alone. Returns `None` when the body matches neither.
pub fn extract(body: &Value) -> Option<ServerError> {
    let field = body
        .pointer("/errors/json")
        .and_then(Value::as_object)
        .and_then(|fields| fields.iter().next())
        .map(|(key, messages)| {
            let message = match messages {
                Value::Array(items) => items.first().map(text).unwrap_or_default(),
                other => text(other),
            };
            ServerError::Field {
                key: key.clone(),
                message,
            }
        });

    let top_level = || body.get("message").map(|message| ServerError::Message(text(message)));

    match field {
        Some(ServerError::Field { key, message }) if message.is_empty() => {
            top_level().or(Some(ServerError::Field { key, message }))
        }
        None => top_level(),
        field => field,
    }
}

/// Message for a rejected response, with a generic fallback.
pub fn rejection_message(response: &HttpResponse) -> String {
    match extract(&response.json()) {
        Some(error) => error.to_string(),
        None => format!("Unexpected response from the server (status {})", response.status),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_errors_shape() {
        let body = json!({"errors": {"json": {"email": ["Invalid"]}}});
        assert_eq!(
            extract(&body),
            Some(ServerError::Field {
                key: "email".into(),
                message: "Invalid".into()
            })
        );
    }

    #[test]
    fn test_message_shape() {
        let body = json!({"message": "Invalid code"});
        assert_eq!(extract(&body), Some(ServerError::Message("Invalid code".into())));
    }

    #[test]
    fn test_first_key_in_document_order() {
        let body: Value = serde_json::from_str(
            r#"{"errors": {"json": {"password": ["Too weak", "Too short"], "email": ["Taken"]}}}"#,
        )
        .unwrap();
        assert_eq!(extract(&body).unwrap().to_string(), "password - Too weak");
    }

    #[test]
    fn test_field_errors_win_over_message() {
        let body = json!({"message": "Unprocessable Entity", "errors": {"json": {"code": ["Missing data"]}}});
        assert_eq!(extract(&body).unwrap().to_string(), "code - Missing data");
    }

    #[test]
    fn test_empty_field_map_falls_back_to_message() {
        let body = json!({"message": "Bad request", "errors": {"json": {}}});
        assert_eq!(extract(&body), Some(ServerError::Message("Bad request".into())));
    }

    #[test]
    fn test_field_without_messages() {
        let bare = json!({"errors": {"json": {"email": []}}});
        assert_eq!(extract(&bare).unwrap().to_string(), "email");

        let with_message = json!({"message": "Unprocessable Entity", "errors": {"json": {"email": []}}});
        assert_eq!(
            extract(&with_message),
            Some(ServerError::Message("Unprocessable Entity".into()))
        );
    }

    #[test]
    fn test_unknown_shape() {
        assert_eq!(extract(&json!({"detail": "nope"})), None);
        assert_eq!(extract(&Value::Null), None);

        let response = HttpResponse::new(502, "<html>Bad Gateway</html>");
        assert_eq!(
            rejection_message(&response),
            "Unexpected response from the server (status 502)"
        );
    }

    #[test]
    fn test_non_string_message_is_stringified() {
        assert_eq!(extract(&json!({"message": 42})).unwrap().to_string(), "42");
    }
}
