//! Application state shared by the REST handlers

use dynact_config::LoadedConfig;
use dynact_connectors::build_verifier;
use dynact_runtime::{EnrichmentEngine, EnrichmentService};
use dynact_store::{MemoryConnectionStore, MemoryConnectorStore, MemorySchemaCatalog};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub service: EnrichmentService,
    /// Fired on shutdown; in-flight verifier calls are abandoned.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(service: EnrichmentService) -> Self {
        Self { service, shutdown: CancellationToken::new() }
    }

    /// Load the manifest into in-memory stores and connect to its verifier.
    pub async fn from_config(config: &LoadedConfig) -> anyhow::Result<Self> {
        let settings = config.verifier_settings()?;
        let verifier = build_verifier(&settings)?;

        let connectors = Arc::new(MemoryConnectorStore::new());
        let connections = Arc::new(MemoryConnectionStore::new());
        let catalog = Arc::new(MemorySchemaCatalog::new());
        config.populate(connectors.as_ref(), connections.as_ref(), catalog.as_ref()).await?;

        tracing::info!(
            verifier = %settings.url,
            retries = settings.retry.as_ref().map(|p| p.max_retries).unwrap_or(0),
            "Verifier configured"
        );

        let engine = EnrichmentEngine::new(verifier, catalog);
        Ok(Self::new(EnrichmentService::new(connectors, connections, engine)))
    }
}
