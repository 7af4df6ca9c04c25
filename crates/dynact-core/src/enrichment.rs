//! Contract between the enrichment engine and its external collaborators.

use crate::error::{ResolutionError, VerificationError};
use crate::types::PropertyValue;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Property name to value, in the order the values were contributed.
pub type PropertyValues = IndexMap<String, JsonValue>;

/// A value counts as provided unless it is `null` or an empty string.
pub fn is_set(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Inputs of a single enrichment call. Owned by the caller, borrowed by the
/// engine for the duration of the call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentRequest {
    /// Connector whose verifier endpoint answers for the action.
    pub connector_id: String,
    /// Values fixed by the connection (credentials and the like).
    pub connector_base_config: PropertyValues,
    /// Values the caller has filled in so far.
    pub user_values: PropertyValues,
}

impl EnrichmentRequest {
    pub fn new(connector_id: impl Into<String>) -> Self {
        Self { connector_id: connector_id.into(), ..Default::default() }
    }

    pub fn with_base_config(mut self, config: PropertyValues) -> Self {
        self.connector_base_config = config;
        self
    }

    pub fn with_user_values(mut self, values: PropertyValues) -> Self {
        self.user_values = values;
        self
    }

    pub fn with_user_value(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.user_values.insert(name.into(), value);
        self
    }
}

/// What the verifier knows about the current partial configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Suggested candidates per property, in the service's order.
    pub suggestions: IndexMap<String, Vec<PropertyValue>>,
    /// Concrete type the input payload was narrowed to, if any.
    pub resolved_type: Option<String>,
    /// Schema text for `resolved_type` when the service supplies it directly.
    pub specification: Option<String>,
}

impl VerificationResult {
    pub fn suggestions_for(&self, name: &str) -> Option<&[PropertyValue]> {
        self.suggestions.get(name).map(Vec::as_slice)
    }

    /// Parse a verifier response body.
    ///
    /// Accepts `name -> [{value,label}]` entries at the top level or under
    /// `properties`, and the resolved type either as `inputDataShape.{type,
    /// specification}` or as top-level `type` / `specification` strings.
    pub fn from_json(body: JsonValue) -> Result<Self, VerificationError> {
        let JsonValue::Object(map) = body else {
            return Err(VerificationError::Malformed("expected a JSON object".to_string()));
        };

        let mut result = VerificationResult::default();
        for (key, value) in map {
            match value {
                JsonValue::Object(properties) if key == "properties" => {
                    for (name, list) in properties {
                        let candidates = parse_candidates(&name, list)?;
                        result.suggestions.insert(name, candidates);
                    }
                }
                JsonValue::Object(shape) if key == "inputDataShape" => {
                    if let Some(t) = shape.get("type").and_then(JsonValue::as_str) {
                        result.resolved_type = non_empty(t.to_string());
                    }
                    if let Some(spec) = shape.get("specification") {
                        result.specification = specification_text(spec);
                    }
                }
                JsonValue::String(t) if key == "type" => result.resolved_type = non_empty(t),
                list @ JsonValue::Array(_) => {
                    let candidates = parse_candidates(&key, list)?;
                    result.suggestions.insert(key, candidates);
                }
                spec if key == "specification" => result.specification = specification_text(&spec),
                // Anything else is metadata this engine does not use
                _ => {}
            }
        }

        if result.resolved_type.is_none() {
            result.specification = None;
        }
        Ok(result)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn specification_text(spec: &JsonValue) -> Option<String> {
    match spec {
        JsonValue::Null => None,
        JsonValue::String(s) => non_empty(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_candidates(name: &str, list: JsonValue) -> Result<Vec<PropertyValue>, VerificationError> {
    let JsonValue::Array(items) = list else {
        return Err(VerificationError::Malformed(format!("suggestions for '{}' are not a list", name)));
    };
    items
        .into_iter()
        .map(|item| match item {
            JsonValue::String(s) => Ok(PropertyValue::new(s.clone(), s)),
            other => serde_json::from_value::<PropertyValue>(other).map_err(|e| {
                VerificationError::Malformed(format!("invalid suggestion for '{}': {}", name, e))
            }),
        })
        .collect()
}

/// External service that derives suggestions from a partial configuration.
///
/// One call performs exactly one round trip; retries belong to wrappers.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(
        &self,
        connector_id: &str,
        action_id: &str,
        values: &PropertyValues,
    ) -> Result<VerificationResult, VerificationError>;
}

#[async_trait]
impl<T: Verifier + ?Sized> Verifier for Arc<T> {
    async fn verify(
        &self,
        connector_id: &str,
        action_id: &str,
        values: &PropertyValues,
    ) -> Result<VerificationResult, VerificationError> {
        (**self).verify(connector_id, action_id, values).await
    }
}

/// Looks up a schema specification for a concrete type name.
#[async_trait]
pub trait DataShapeResolver: Send + Sync {
    async fn resolve(&self, shape_type: &str) -> Result<String, ResolutionError>;
}

#[async_trait]
impl<T: DataShapeResolver + ?Sized> DataShapeResolver for Arc<T> {
    async fn resolve(&self, shape_type: &str) -> Result<String, ResolutionError> {
        (**self).resolve(shape_type).await
    }
}

/// Resolver that knows no schemas at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchemas;

#[async_trait]
impl DataShapeResolver for NoSchemas {
    async fn resolve(&self, shape_type: &str) -> Result<String, ResolutionError> {
        Err(ResolutionError::NotFound(shape_type.to_string()))
    }
}
