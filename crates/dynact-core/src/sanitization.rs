//! Masking of credential-looking values before they reach logs

use crate::enrichment::PropertyValues;
use serde_json::{Map, Value as JsonValue};

/// Substrings that mark a property name as sensitive (compared lowercase,
/// with `_` and `-` removed so `clientSecret`, `client_secret` and
/// `client-secret` all match).
const SENSITIVE_MARKERS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "token",
    "apikey",
    "privatekey",
    "credential",
    "authorization",
];

const REDACTED: &str = "***REDACTED***";

pub fn is_sensitive_field(field_name: &str) -> bool {
    let normalized: String = field_name
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    SENSITIVE_MARKERS.iter().any(|marker| normalized.contains(marker))
}

/// Copy of `value` with every sensitive scalar replaced by a placeholder.
pub fn sanitize_json_value(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(key, val)| (key.clone(), sanitize_field(key, val)))
                .collect::<Map<String, JsonValue>>(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(sanitize_json_value).collect()),
        other => other.clone(),
    }
}

/// Sanitized JSON rendering of a property value map, for log fields.
pub fn sanitize_values(values: &PropertyValues) -> JsonValue {
    JsonValue::Object(
        values
            .iter()
            .map(|(key, val)| (key.clone(), sanitize_field(key, val)))
            .collect(),
    )
}

fn sanitize_field(key: &str, value: &JsonValue) -> JsonValue {
    if !is_sensitive_field(key) {
        return sanitize_json_value(value);
    }
    match value {
        // Unset stays visible: it is what the verifier is being asked about
        JsonValue::Null => JsonValue::Null,
        JsonValue::Object(_) | JsonValue::Array(_) => sanitize_json_value(value),
        _ => JsonValue::String(REDACTED.to_string()),
    }
}
