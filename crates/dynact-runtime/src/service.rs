//! Enrichment for stored connections

use crate::engine::EnrichmentEngine;
use crate::error::{RuntimeError, RuntimeResult};
use dynact_core::{ActionDefinition, ConnectionStore, ConnectorStore, EnrichmentRequest, PropertyValues};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Looks up the connection and its connector, then hands the action template
/// to the engine with the connection's configured properties as base config.
#[derive(Clone)]
pub struct EnrichmentService {
    connectors: Arc<dyn ConnectorStore>,
    connections: Arc<dyn ConnectionStore>,
    engine: EnrichmentEngine,
}

impl EnrichmentService {
    pub fn new(
        connectors: Arc<dyn ConnectorStore>,
        connections: Arc<dyn ConnectionStore>,
        engine: EnrichmentEngine,
    ) -> Self {
        Self { connectors, connections, engine }
    }

    /// Build the request for `action_id` on `connection_id` without calling
    /// the verifier.
    pub async fn prepare(
        &self,
        connection_id: &str,
        action_id: &str,
        user_values: PropertyValues,
    ) -> RuntimeResult<(ActionDefinition, EnrichmentRequest)> {
        let connection = self
            .connections
            .get(connection_id)
            .await?
            .ok_or_else(|| RuntimeError::ConnectionNotFound(connection_id.to_string()))?;

        let connector = self
            .connectors
            .get(&connection.connector_id)
            .await?
            .ok_or_else(|| RuntimeError::ConnectorNotFound(connection.connector_id.clone()))?;

        let action = connector.find_action(action_id).ok_or_else(|| RuntimeError::ActionNotFound {
            connector_id: connector.id.clone(),
            action_id: action_id.to_string(),
        })?;

        let request = EnrichmentRequest::new(connector.id.clone())
            .with_base_config(connection.configured_properties.clone())
            .with_user_values(user_values);

        Ok((action.definition.clone(), request))
    }

    pub async fn enrich_for_connection(
        &self,
        connection_id: &str,
        action_id: &str,
        user_values: PropertyValues,
    ) -> RuntimeResult<ActionDefinition> {
        let (template, request) = self.prepare(connection_id, action_id, user_values).await?;
        tracing::debug!(connection_id, action_id, "Enriching action for connection");
        Ok(self.engine.enrich(&template, &request).await?)
    }

    /// Same as [`enrich_for_connection`](Self::enrich_for_connection) but
    /// abandons the verifier call once `cancel` fires.
    pub async fn enrich_for_connection_with_cancel(
        &self,
        connection_id: &str,
        action_id: &str,
        user_values: PropertyValues,
        cancel: &CancellationToken,
    ) -> RuntimeResult<ActionDefinition> {
        let (template, request) = self.prepare(connection_id, action_id, user_values).await?;
        Ok(self.engine.enrich_with_cancel(&template, &request, cancel).await?)
    }
}
