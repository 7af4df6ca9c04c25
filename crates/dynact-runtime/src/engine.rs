//! Enrichment of action definition templates with verifier suggestions

use crate::error::{EnrichError, EnrichResult};
use crate::merge::merge_values;
use async_trait::async_trait;
use dynact_core::{
    is_set, sanitize_values, ActionDefinition, DataShape, DataShapeResolver, EnrichmentRequest,
    PropertyValue, PropertyValues, ResolutionError, VerificationResult, Verifier,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Stateless orchestrator: merges known values, asks the verifier, and folds
/// the answer into a fresh copy of the template.
///
/// The engine holds no per-call state, so one instance can serve any number
/// of concurrent calls.
#[derive(Clone)]
pub struct EnrichmentEngine {
    verifier: Arc<dyn Verifier>,
    resolver: Arc<dyn DataShapeResolver>,
}

impl EnrichmentEngine {
    pub fn new(verifier: Arc<dyn Verifier>, resolver: Arc<dyn DataShapeResolver>) -> Self {
        Self { verifier, resolver }
    }

    /// Produce the enriched definition for `template` given what `request`
    /// already knows. Fails without any partial result if the verifier does.
    pub async fn enrich(
        &self,
        template: &ActionDefinition,
        request: &EnrichmentRequest,
    ) -> EnrichResult<ActionDefinition> {
        let start = Instant::now();
        let action_id = template.action_id();
        let merged = merge_values(template, request);

        tracing::debug!(
            connector_id = %request.connector_id,
            action_id = %action_id,
            values = %sanitize_values(&merged),
            "Requesting verifier suggestions"
        );

        let result = self
            .verifier
            .verify(&request.connector_id, action_id, &merged)
            .await
            .map_err(|e| {
                tracing::warn!(
                    connector_id = %request.connector_id,
                    action_id = %action_id,
                    error = %e,
                    "Verification failed, no enrichment applied"
                );
                EnrichError::from(e)
            })?;

        let enriched = self.apply(template, &merged, result).await?;

        tracing::info!(
            connector_id = %request.connector_id,
            action_id = %action_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Enriched action definition"
        );
        Ok(enriched)
    }

    /// Like [`enrich`](Self::enrich), but gives up as soon as `cancel` fires.
    /// A verifier answer arriving after cancellation is discarded.
    pub async fn enrich_with_cancel(
        &self,
        template: &ActionDefinition,
        request: &EnrichmentRequest,
        cancel: &CancellationToken,
    ) -> EnrichResult<ActionDefinition> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(action_id = %template.action_id(), "Enrichment cancelled");
                Err(EnrichError::Cancelled)
            }
            result = self.enrich(template, request) => result,
        }
    }

    async fn apply(
        &self,
        template: &ActionDefinition,
        merged: &PropertyValues,
        result: VerificationResult,
    ) -> EnrichResult<ActionDefinition> {
        let enriched = template.map_properties(|name, property| {
            if let Some(value) = merged.get(name).filter(|v| is_set(v)) {
                return property.with_candidates(vec![PropertyValue::pinned(value)]);
            }
            match result.suggestions_for(name) {
                Some(suggested) => property.with_candidates(suggested.to_vec()),
                None => property.clone(),
            }
        });

        let (Some(resolved_type), Some(template_shape)) =
            (result.resolved_type.as_deref(), template.input_data_shape())
        else {
            return Ok(enriched);
        };

        let resolver = VerifiedSpecification {
            shape_type: resolved_type,
            specification: result.specification.as_deref(),
            fallback: self.resolver.as_ref(),
        };

        let mut shape = DataShape::new(template_shape.kind.clone()).with_type(resolved_type);
        match resolver.resolve(resolved_type).await {
            Ok(specification) => shape = shape.with_specification(specification),
            Err(ResolutionError::NotFound(_)) => {
                tracing::debug!(shape_type = %resolved_type, "No schema specification available");
            }
            Err(e) => {
                tracing::warn!(shape_type = %resolved_type, error = %e, "Schema lookup failed");
            }
        }

        Ok(enriched.with_input_data_shape(shape)?)
    }
}

/// Answers with the specification the verifier sent along with the resolved
/// type, and asks `fallback` for anything else.
struct VerifiedSpecification<'a> {
    shape_type: &'a str,
    specification: Option<&'a str>,
    fallback: &'a dyn DataShapeResolver,
}

#[async_trait]
impl<'a> DataShapeResolver for VerifiedSpecification<'a> {
    async fn resolve(&self, shape_type: &str) -> Result<String, ResolutionError> {
        match self.specification {
            Some(spec) if shape_type == self.shape_type => Ok(spec.to_string()),
            _ => self.fallback.resolve(shape_type).await,
        }
    }
}
