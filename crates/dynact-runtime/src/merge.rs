use dynact_core::{is_set, ActionDefinition, EnrichmentRequest, PropertyValues};
use serde_json::Value as JsonValue;

/// Values sent to the verifier for `template`.
///
/// Key order is base config, then template properties in step order, then
/// any other user keys. User values win on collision and keep the position
/// of the key they replace. Every template property is present; unset ones
/// (null or empty string) are sent as `null`.
pub fn merge_values(template: &ActionDefinition, request: &EnrichmentRequest) -> PropertyValues {
    let mut merged = PropertyValues::with_capacity(
        request.connector_base_config.len() + request.user_values.len(),
    );

    for (name, value) in &request.connector_base_config {
        merged.insert(name.clone(), normalize(value));
    }
    for name in template.property_names() {
        merged.entry(name.to_string()).or_insert(JsonValue::Null);
    }
    for (name, value) in &request.user_values {
        merged.insert(name.clone(), normalize(value));
    }

    merged
}

fn normalize(value: &JsonValue) -> JsonValue {
    if is_set(value) {
        value.clone()
    } else {
        JsonValue::Null
    }
}
