use async_trait::async_trait;
use dynact_core::{Connection, ConnectionStore, Connector, ConnectorStore, CoreResult};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of ConnectorStore
#[derive(Debug, Clone)]
pub struct MemoryConnectorStore {
    data: Arc<RwLock<HashMap<String, Connector>>>,
}

impl MemoryConnectorStore {
    pub fn new() -> Self {
        Self { data: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for MemoryConnectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectorStore for MemoryConnectorStore {
    async fn upsert(&self, connector: &Connector) -> CoreResult<()> {
        let mut data = self.data.write().await;
        data.insert(connector.id.clone(), connector.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> CoreResult<Option<Connector>> {
        let data = self.data.read().await;
        Ok(data.get(id).cloned())
    }
}

/// In-memory implementation of ConnectionStore
#[derive(Debug, Clone)]
pub struct MemoryConnectionStore {
    data: Arc<RwLock<HashMap<String, Connection>>>,
}

impl MemoryConnectionStore {
    pub fn new() -> Self {
        Self { data: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for MemoryConnectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionStore for MemoryConnectionStore {
    async fn upsert(&self, connection: &Connection) -> CoreResult<()> {
        let mut data = self.data.write().await;
        data.insert(connection.id.clone(), connection.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> CoreResult<Option<Connection>> {
        let data = self.data.read().await;
        Ok(data.get(id).cloned())
    }
}
