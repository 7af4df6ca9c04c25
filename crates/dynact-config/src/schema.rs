//! Manifest file layout

use dynact_connectors::VerifierSettings;
use dynact_core::{ConfigurationProperty, DataShape};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier: Option<VerifierSettings>,
    #[serde(default)]
    pub connectors: IndexMap<String, ConnectorConfig>,
    #[serde(default)]
    pub connections: IndexMap<String, ConnectionConfig>,
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Shared property catalog that action steps refer to by name.
    #[serde(default)]
    pub properties: IndexMap<String, ConfigurationProperty>,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data_shape: Option<DataShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_data_shape: Option<DataShape>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Names from the connector's `properties` catalog, in display order.
    #[serde(default)]
    pub properties: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub connector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub configured_properties: IndexMap<String, JsonValue>,
}

/// Schema text given inline or as a path relative to the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaSource {
    Text(String),
    Inline { specification: String },
    File { file: PathBuf },
}
