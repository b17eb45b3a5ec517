//! API Error Taxonomy
//!
//! Every failure at the REST boundary becomes an `ApiError`. The UI only
//! ever shows `user_message()`, never the `Display` text.

use serde_json::Value;
use thiserror::Error;

use super::envelope;
use crate::form::FieldErrors;

/// Shown when the server gives no usable message
pub const GENERIC_FAILURE: &str = "Request failed. Please try again.";

const NETWORK_FAILURE: &str = "Unable to reach the server. Check your connection and try again.";
const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
const NOT_PERMITTED: &str = "You do not have permission to perform this action.";
const NOT_FOUND: &str = "The requested record was not found.";
const FIX_FIELDS: &str = "Please correct the highlighted fields.";

/// Fragments that mark a message as an internal error rather than text
/// meant for users
const INTERNAL_MARKERS: &[&str] = &[
    "cannot read propert",
    "is not a function",
    "undefined",
    "traceback",
    "stack trace",
    "exception",
    "panicked at",
    "syntaxerror",
    "typeerror",
    "sqlstate",
    "\n    at ",
];

const MAX_MESSAGE_LEN: usize = 240;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server returned {status}")]
    Server { status: u16, message: Option<String> },

    #[error("validation failed")]
    Validation { message: Option<String>, fields: FieldErrors },

    #[error("not found")]
    NotFound { message: Option<String> },

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden { message: Option<String> },

    /// 2xx response carrying `{success: false}`
    #[error("rejected: {0}")]
    Rejected(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success HTTP response to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed.as_ref().and_then(envelope::error_message);
        let fields = parsed.as_ref().map(envelope::field_errors).unwrap_or_default();

        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            400 | 422 if !fields.is_empty() => ApiError::Validation { message, fields },
            _ => ApiError::Server { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Field-scoped messages the server attached, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Text safe to show in a banner or inline form error. Server messages
    /// pass through verbatim unless they look like leaked internals.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => NETWORK_FAILURE.to_string(),
            ApiError::Server { message, .. } => presentable_or(message.as_deref(), GENERIC_FAILURE),
            ApiError::Validation { message, .. } => presentable_or(message.as_deref(), FIX_FIELDS),
            ApiError::NotFound { message } => presentable_or(message.as_deref(), NOT_FOUND),
            ApiError::Unauthorized => SESSION_EXPIRED.to_string(),
            ApiError::Forbidden { message } => presentable_or(message.as_deref(), NOT_PERMITTED),
            ApiError::Rejected(message) => presentable_or(Some(message), GENERIC_FAILURE),
            ApiError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

fn presentable_or(message: Option<&str>, fallback: &str) -> String {
    match message.map(str::trim) {
        Some(m) if is_presentable(m) => m.to_string(),
        _ => fallback.to_string(),
    }
}

/// Whether a server-provided message can be shown to users as is
pub fn is_presentable(message: &str) -> bool {
    let message = message.trim();
    if message.is_empty() || message.len() > MAX_MESSAGE_LEN {
        return false;
    }
    let lowered = message.to_lowercase();
    !INTERNAL_MARKERS.iter().any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_passes_through() {
        let err = ApiError::from_status(409, r#"{"error": "Room number already exists"}"#);
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.user_message(), "Room number already exists");
    }

    #[test]
    fn test_empty_body_gives_generic_message() {
        let err = ApiError::from_status(500, "");
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_raw_exception_text_is_hidden() {
        let err = ApiError::from_status(500, r#"{"message": "Cannot read properties of undefined (reading 'id')"}"#);
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ApiError::Rejected("TypeError: x is not a function\n    at foo (app.js:1)".into());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_status_mapping() {
        assert!(ApiError::from_status(401, "").is_unauthorized());
        assert!(ApiError::from_status(404, r#"{"detail": "Room not found"}"#).is_not_found());
        assert_eq!(
            ApiError::from_status(404, r#"{"detail": "Room not found"}"#).user_message(),
            "Room not found"
        );
        assert!(matches!(ApiError::from_status(403, ""), ApiError::Forbidden { .. }));
    }

    #[test]
    fn test_field_errors_become_validation() {
        let err = ApiError::from_status(422, r#"{"message": "Invalid", "errors": {"quantity": ["must be positive"]}}"#);
        let fields = err.field_errors().expect("validation error");
        assert_eq!(fields.get("quantity").map(String::as_str), Some("must be positive"));
        assert_eq!(err.user_message(), "Invalid");
    }

    #[test]
    fn test_network_error_hides_transport_detail() {
        let err = ApiError::Network("error sending request for url (http://x)".into());
        assert!(!err.user_message().contains("http://"));
    }
}
