//! Error taxonomy for calls against the records backend.
//!
//! Every failure a service call can produce is one of four kinds:
//!
//! - transport failure (no response at all, including timeouts)
//! - structured validation failure (4xx carrying per-field messages)
//! - "not found" (the entity is absent)
//! - generic request failure (any other 4xx/5xx)
//!
//! plus a decode failure for a 2xx body that does not match the expected
//! shape. Callers at the query/action boundary decide how each kind is shown;
//! nothing here retries.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Per-field validation messages, keyed by the backend's field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Status used for failures raised by local input validation.
pub const LOCAL_VALIDATION_STATUS: u16 = 422;

const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Error body returned by the backend: `{ message, errors? }`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Transport { message: String },

    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("{message}")]
    Validation {
        status: u16,
        message: String,
        errors: FieldErrors,
    },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Unexpected response body: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Classifies a non-success response from its status and raw body.
    ///
    /// The body is parsed leniently: a missing or malformed JSON body still
    /// yields an error carrying the status, with a generic message.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let message = parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message(status));

        if status == 404 {
            return Self::NotFound { message };
        }

        match parsed.errors {
            Some(errors) if (400..500).contains(&status) && !errors.is_empty() => {
                Self::Validation {
                    status,
                    message,
                    errors,
                }
            }
            _ => Self::Request { status, message },
        }
    }

    /// HTTP status of the failed response, or `None` when no response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. } | Self::Request { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Transport { .. } | Self::Timeout { .. } | Self::Decode { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Per-field messages, when the failure carries any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// The message shown to a user. Falls back to `fallback` for failures
    /// whose message is not meant for end users.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message }
            | Self::Request { message, .. } => message.clone(),
            Self::Transport { .. } | Self::Timeout { .. } => self.to_string(),
            Self::Decode { .. } => fallback.to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        collect_field_errors(&errors, None, &mut fields);

        Self::Validation {
            status: LOCAL_VALIDATION_STATUS,
            message: "Validation failed".to_string(),
            errors: fields,
        }
    }
}

fn collect_field_errors(errors: &ValidationErrors, parent: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let name = match parent {
            Some(parent) => format!("{parent}.{field}"),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                let messages = out.entry(name.clone()).or_default();
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{name} is invalid ({})", error.code));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(nested, Some(&name), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let indexed = format!("{name}[{index}]");
                    collect_field_errors(nested, Some(&indexed), out);
                }
            }
        }
    }
}

fn default_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "You are not signed in".to_string(),
        403 => "You do not have permission to perform this action".to_string(),
        404 => "Resource not found".to_string(),
        409 => "The request conflicts with existing data".to_string(),
        422 => "Validation failed".to_string(),
        500..=599 => "The server encountered an error".to_string(),
        _ => FALLBACK_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_not_found_is_classified_by_status() {
        let err = ApiError::from_response(404, br#"{"message":"Department not found"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Department not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_field_errors_make_a_validation_error() {
        let body = br#"{"message":"Invalid input","errors":{"code":["Code already exists"]}}"#;
        let err = ApiError::from_response(400, body);

        assert!(err.is_validation());
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["code"], vec!["Code already exists".to_string()]);
    }

    #[test]
    fn test_conflict_without_fields_is_a_request_error() {
        let body = br#"{"message":"Department has active students"}"#;
        let err = ApiError::from_response(409, body);

        assert_eq!(
            err,
            ApiError::Request {
                status: 409,
                message: "Department has active students".to_string()
            }
        );
    }

    #[test]
    fn test_server_error_with_errors_map_is_not_validation() {
        let body = br#"{"message":"boom","errors":{"x":["y"]}}"#;
        let err = ApiError::from_response(500, body);
        assert!(!err.is_validation());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_unparseable_body_uses_default_message() {
        let err = ApiError::from_response(503, b"<html>gateway</html>");
        assert_eq!(err.to_string(), "The server encountered an error");

        let err = ApiError::from_response(418, b"");
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_transport_errors_have_no_status() {
        assert_eq!(ApiError::transport("connection refused").status(), None);
        assert_eq!(ApiError::Timeout { seconds: 30 }.status(), None);
    }

    #[test]
    fn test_user_message_hides_decode_details() {
        let err = ApiError::decode("missing field `id`");
        assert_eq!(err.user_message("Failed to load"), "Failed to load");
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(range(min = 1))]
        years: u32,
    }

    #[test]
    fn test_local_validation_errors_keep_field_names() {
        let sample = Sample {
            name: String::new(),
            years: 0,
        };
        let err: ApiError = sample.validate().unwrap_err().into();

        assert_eq!(err.status(), Some(LOCAL_VALIDATION_STATUS));
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["name"], vec!["Name is required".to_string()]);
        assert!(fields["years"][0].contains("range"));
    }
}
