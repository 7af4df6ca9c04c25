use crate::error::CoreResult;
use crate::types::{Connection, Connector};
use async_trait::async_trait;

/// Async trait for storing and retrieving connectors with their action templates
#[async_trait]
pub trait ConnectorStore: Send + Sync {
    /// Insert or replace a connector
    async fn upsert(&self, connector: &Connector) -> CoreResult<()>;
    /// Get a connector by id
    async fn get(&self, id: &str) -> CoreResult<Option<Connector>>;
}

/// Async trait for storing and retrieving connections
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Insert or replace a connection
    async fn upsert(&self, connection: &Connection) -> CoreResult<()>;
    /// Get a connection by id
    async fn get(&self, id: &str) -> CoreResult<Option<Connection>>;
}
