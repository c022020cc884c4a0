use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(ApiError::Unauthorized(_)))
    }

    /// Per-field messages to show inline on a form
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::Api(ApiError::Fields(fields)) => Some(fields),
            _ => None,
        }
    }
}

/// Failures talking to the course backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Session is not authorized (status {0})")]
    Unauthorized(u16),

    #[error("{}", .0.summary())]
    Fields(FieldErrors),

    #[error("Request failed with status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    #[error("Received invalid json data: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response by status code and body
    pub fn from_response(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized(status),
            400 | 422 => match FieldErrors::from_body(body) {
                Some(fields) => ApiError::Fields(fields),
                None => ApiError::Status { status, message: detail_message(body) },
            },
            _ => ApiError::Status { status, message: detail_message(body) },
        }
    }
}

/// Client-side checks that stop a request from being sent
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field `{0}` is required")]
    MissingField(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Answer is empty")]
    EmptyAnswer,

    #[error("Answer was already submitted")]
    AlreadySubmitted,
}

/// Server-reported validation messages keyed by form field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub fields: BTreeMap<String, String>,
    /// Message not tied to a field (`detail`)
    pub general: Option<String>,
}

impl FieldErrors {
    /// Parse `{"field": "msg" | ["msg", ...], "detail": "msg"}`
    pub fn from_body(body: &str) -> Option<Self> {
        let Value::Object(map) = serde_json::from_str::<Value>(body).ok()? else {
            return None;
        };
        let mut errors = FieldErrors::default();
        for (key, value) in map {
            let Some(message) = message_of(&value) else { continue };
            if key == "detail" || key == "non_field_errors" {
                errors.general = Some(message);
            } else {
                errors.fields.insert(key, message);
            }
        }
        (!errors.fields.is_empty() || errors.general.is_some()).then_some(errors)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    fn summary(&self) -> String {
        if let Some(general) = &self.general {
            return general.clone();
        }
        self.fields
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("detail").and_then(message_of)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_statuses() {
        assert_eq!(ApiError::from_response(401, ""), ApiError::Unauthorized(401));
        assert_eq!(ApiError::from_response(403, "{}"), ApiError::Unauthorized(403));
        assert!(Error::from(ApiError::Unauthorized(401)).is_unauthorized());
    }

    #[test]
    fn test_field_errors_from_body() {
        let body = r#"{"username": ["already taken"], "password": "too short", "detail": "Invalid data"}"#;
        let ApiError::Fields(fields) = ApiError::from_response(400, body) else {
            panic!("expected field errors");
        };
        assert_eq!(fields.get("username"), Some("already taken"));
        assert_eq!(fields.get("password"), Some("too short"));
        assert_eq!(fields.general.as_deref(), Some("Invalid data"));
    }

    #[test]
    fn test_other_status_keeps_detail() {
        let error = ApiError::from_response(500, r#"{"detail": "boom"}"#);
        assert_eq!(error, ApiError::Status { status: 500, message: Some("boom".into()) });
        assert_eq!(error.to_string(), "Request failed with status 500: boom");
        assert_eq!(
            ApiError::from_response(400, "not json"),
            ApiError::Status { status: 400, message: None }
        );
    }
}
