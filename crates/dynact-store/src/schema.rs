//! Schema specifications keyed by concrete type name

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use dynact_core::{DataShapeResolver, ResolutionError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory schema catalog used as the data shape resolver.
#[derive(Debug, Clone, Default)]
pub struct MemorySchemaCatalog {
    schemas: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, shape_type: impl Into<String>, specification: impl Into<String>) {
        let mut schemas = self.schemas.write().await;
        schemas.insert(shape_type.into(), specification.into());
    }

    /// Register the contents of `path` as the specification for `shape_type`.
    /// The file must hold valid JSON.
    pub async fn insert_file(&self, shape_type: &str, path: &Path) -> StoreResult<()> {
        let text = tokio::fs::read_to_string(path).await?;
        serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
            StoreError::Validation(format!(
                "schema for '{}' at {} is not valid JSON: {}",
                shape_type,
                path.display(),
                e
            ))
        })?;
        self.insert(shape_type, text).await;
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.schemas.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.schemas.read().await.is_empty()
    }
}

#[async_trait]
impl DataShapeResolver for MemorySchemaCatalog {
    async fn resolve(&self, shape_type: &str) -> Result<String, ResolutionError> {
        let schemas = self.schemas.read().await;
        match schemas.get(shape_type) {
            Some(spec) => Ok(spec.clone()),
            None => {
                tracing::debug!(shape_type, "Schema not in catalog");
                Err(ResolutionError::NotFound(shape_type.to_string()))
            }
        }
    }
}
