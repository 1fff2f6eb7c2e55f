//! Request-body field validation
//!
//! Hand-written field accessors used by the per-entity request validators.
//! Every POST body is received as raw JSON and walked explicitly: required
//! fields must be present with the right type, optional fields default to
//! `None`, unknown fields are ignored. Any violation is reported as a
//! generic validation failure and nothing is persisted.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A required RFC 3339 timestamp field.
pub fn required_timestamp(
    body: &Map<String, Value>,
    key: &str,
) -> Result<DateTime<Utc>, String> {
    let value = body.get(key).ok_or_else(|| format!("{} is required", key))?;
    let raw = value
        .as_str()
        .ok_or_else(|| format!("{} must be a timestamp string", key))?;

    raw.parse::<DateTime<Utc>>()
        .map_err(|_| format!("{} must be an RFC 3339 timestamp", key))
}

/// A required string field.
pub fn required_string(body: &Map<String, Value>, key: &str) -> Result<String, String> {
    let value = body.get(key).ok_or_else(|| format!("{} is required", key))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("{} must be a string", key))
}

/// An optional string field; absent or `null` becomes `None`.
pub fn optional_string(body: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| format!("{} must be a string", key)),
    }
}

/// An optional integer field; absent or `null` becomes `None`. Fractional
/// numbers are rejected.
pub fn optional_i32(body: &Map<String, Value>, key: &str) -> Result<Option<i32>, String> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let wide = value
                .as_i64()
                .ok_or_else(|| format!("{} must be an integer", key))?;
            let narrow =
                i32::try_from(wide).map_err(|_| format!("{} is out of range", key))?;
            Ok(Some(narrow))
        }
    }
}

/// The body itself must be a JSON object.
pub fn as_object(body: &Value) -> Result<&Map<String, Value>, String> {
    body.as_object().ok_or_else(|| "body must be a JSON object".to_string())
}
