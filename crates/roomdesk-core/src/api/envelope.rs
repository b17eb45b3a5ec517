//! Response Envelopes
//!
//! The backend is inconsistent about response shapes: lists arrive bare or
//! wrapped in `result`, `results`, `data` or `items`; mutations return the
//! entity, a wrapped entity, or just `{success, message}`. Everything is
//! normalized here so nothing above the fetch boundary sees the difference.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, GENERIC_FAILURE};
use crate::form::FieldErrors;

const LIST_KEYS: &[&str] = &["results", "result", "data", "items"];
const ENTITY_KEYS: &[&str] = &["data", "result", "record"];

/// Outcome of a create/update call
#[derive(Debug, Clone, PartialEq)]
pub enum Saved<T> {
    /// The server echoed the saved record
    Record(T),
    /// The server only acknowledged; the list must be re-fetched
    Acknowledged(Option<String>),
}

/// Extract the array of a list response
pub fn list_items(value: Value) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            if let Some(false) = map.get("success").and_then(Value::as_bool) {
                return Err(rejection(&Value::Object(map)));
            }
            for key in LIST_KEYS {
                match map.remove(*key) {
                    Some(Value::Array(items)) => return Ok(items),
                    // {data: {results: [...]}}
                    Some(nested @ Value::Object(_)) => {
                        if let Ok(items) = list_items(nested) {
                            return Ok(items);
                        }
                    }
                    _ => {}
                }
            }
            Err(ApiError::Decode("expected a list of records".into()))
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(ApiError::Decode("expected a list of records".into())),
    }
}

/// Decode a list response into records
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    list_items(value)?
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
        .collect()
}

/// Decode a single-record response (detail fetch or mutation)
pub fn decode_saved<T: DeserializeOwned>(value: Option<Value>) -> Result<Saved<T>, ApiError> {
    let Some(value) = value else {
        return Ok(Saved::Acknowledged(None));
    };
    if let Some(false) = value.get("success").and_then(Value::as_bool) {
        return Err(rejection(&value));
    }
    for key in ENTITY_KEYS {
        if let Some(inner @ Value::Object(_)) = value.get(*key) {
            if let Ok(record) = serde_json::from_value(inner.clone()) {
                return Ok(Saved::Record(record));
            }
        }
    }
    match serde_json::from_value::<T>(value.clone()) {
        Ok(record) => Ok(Saved::Record(record)),
        Err(_) if value.get("success").is_some() => {
            Ok(Saved::Acknowledged(value.get("message").and_then(Value::as_str).map(str::to_string)))
        }
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

/// Decode a response that must carry a record
pub fn decode_record<T: DeserializeOwned>(value: Option<Value>) -> Result<T, ApiError> {
    match decode_saved(value)? {
        Saved::Record(record) => Ok(record),
        Saved::Acknowledged(_) => Err(ApiError::Decode("expected a record".into())),
    }
}

/// Check a delete-style acknowledgement: empty body, or `{success: true}`
pub fn acknowledge(value: Option<Value>) -> Result<(), ApiError> {
    match value {
        Some(v) if v.get("success").and_then(Value::as_bool) == Some(false) => Err(rejection(&v)),
        _ => Ok(()),
    }
}

/// Message from an error body: `error` (string or `{message}`), `message` or `detail`
pub fn error_message(value: &Value) -> Option<String> {
    let candidate = match value.get("error") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(inner)) => inner.get("message").and_then(Value::as_str),
        _ => None,
    }
    .or_else(|| value.get("message").and_then(Value::as_str))
    .or_else(|| value.get("detail").and_then(Value::as_str));

    candidate.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Field-scoped messages from `{errors: {field: "msg" | ["msg", ...]}}`
pub fn field_errors(value: &Value) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(Value::Object(map)) = value.get("errors") {
        for (field, messages) in map {
            let first = match messages {
                Value::String(s) => Some(s.clone()),
                Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
                _ => None,
            };
            if let Some(message) = first {
                errors.insert(field.clone(), message);
            }
        }
    }
    errors
}

fn rejection(value: &Value) -> ApiError {
    ApiError::Rejected(error_message(value).unwrap_or_else(|| GENERIC_FAILURE.to_string()))
}
