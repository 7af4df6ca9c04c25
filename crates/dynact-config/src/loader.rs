use crate::env_resolver::EnvResolver;
use crate::error::{ConfigError, ConfigResult};
use crate::schema::{ActionConfig, ConfigManifest, ConnectorConfig, SchemaSource};
use crate::settings::apply_verifier_env;
use dynact_connectors::VerifierSettings;
use dynact_core::{
    ActionDefinition, ConfigurationError, Connection, ConnectionStore, Connector, ConnectorAction,
    ConnectorStore,
};
use dynact_store::MemorySchemaCatalog;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

/// Supported file formats for configuration
#[derive(Debug, Clone, PartialEq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Detect file format from extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }
}

/// Schema specification whose text still has to be read.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEntry {
    Inline(String),
    File(PathBuf),
}

/// Validated manifest contents, ready to be loaded into stores.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub verifier: Option<VerifierSettings>,
    pub connectors: Vec<Connector>,
    pub connections: Vec<Connection>,
    pub schemas: Vec<(String, SchemaEntry)>,
}

impl LoadedConfig {
    /// Verifier settings from the manifest with environment overrides, which
    /// may also supply them entirely.
    pub fn verifier_settings(&self) -> ConfigResult<VerifierSettings> {
        let settings = apply_verifier_env(self.verifier.clone())?
            .ok_or_else(|| ConfigError::MissingField("verifier.url".to_string()))?;
        settings.validate().map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(settings)
    }

    pub fn action_count(&self) -> usize {
        self.connectors.iter().map(|c| c.actions.len()).sum()
    }

    /// Put every record into the given stores.
    pub async fn populate(
        &self,
        connectors: &dyn ConnectorStore,
        connections: &dyn ConnectionStore,
        catalog: &MemorySchemaCatalog,
    ) -> ConfigResult<()> {
        for connector in &self.connectors {
            connectors.upsert(connector).await?;
        }
        for connection in &self.connections {
            connections.upsert(connection).await?;
        }
        for (shape_type, entry) in &self.schemas {
            match entry {
                SchemaEntry::Inline(text) => catalog.insert(shape_type.clone(), text.clone()).await,
                SchemaEntry::File(path) => catalog.insert_file(shape_type, path).await?,
            }
        }
        tracing::info!(
            connectors = self.connectors.len(),
            connections = self.connections.len(),
            schemas = self.schemas.len(),
            "Loaded manifest into stores"
        );
        Ok(())
    }
}

/// Reads manifests, interpolates environment variables and builds validated
/// action definitions.
pub struct ConfigLoader {
    env: EnvResolver,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(EnvResolver::default())
    }
}

impl ConfigLoader {
    pub fn new(env: EnvResolver) -> Self {
        Self { env }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<LoadedConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let format = FileFormat::from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        tracing::debug!(path = %path.display(), ?format, "Loading manifest");
        self.parse_content(&content, format, base_dir)
    }

    /// Relative schema file paths are resolved against `base_dir`.
    pub fn parse_content(
        &self,
        content: &str,
        format: FileFormat,
        base_dir: &Path,
    ) -> ConfigResult<LoadedConfig> {
        let raw: JsonValue = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        let resolved = self.resolve_env(&raw)?;
        let manifest: ConfigManifest = serde_json::from_value(resolved)?;
        self.build(manifest, base_dir)
    }

    /// Only the `verifier` section gets typed values; everything else,
    /// connection properties in particular, keeps the literal strings.
    fn resolve_env(&self, raw: &JsonValue) -> ConfigResult<JsonValue> {
        let JsonValue::Object(sections) = raw else {
            return Ok(self.env.resolve(raw)?);
        };
        let mut resolved = serde_json::Map::with_capacity(sections.len());
        for (key, value) in sections {
            let value = if key == "verifier" {
                self.env.resolve_typed(value)?
            } else {
                self.env.resolve(value)?
            };
            resolved.insert(key.clone(), value);
        }
        Ok(JsonValue::Object(resolved))
    }

    fn build(&self, manifest: ConfigManifest, base_dir: &Path) -> ConfigResult<LoadedConfig> {
        let connectors = manifest
            .connectors
            .iter()
            .map(|(id, config)| build_connector(id, config))
            .collect::<ConfigResult<Vec<_>>>()?;

        let mut connections = Vec::with_capacity(manifest.connections.len());
        for (id, config) in manifest.connections {
            if !manifest.connectors.contains_key(&config.connector) {
                return Err(ConfigError::Validation(format!(
                    "Connection '{}' references unknown connector '{}'",
                    id, config.connector
                )));
            }
            connections.push(Connection {
                name: config.name.unwrap_or_else(|| id.clone()),
                id,
                connector_id: config.connector,
                configured_properties: config.configured_properties,
            });
        }

        let schemas = manifest
            .schemas
            .into_iter()
            .map(|(shape_type, source)| {
                let entry = match source {
                    SchemaSource::Text(text) | SchemaSource::Inline { specification: text } => {
                        SchemaEntry::Inline(text)
                    }
                    SchemaSource::File { file } if file.is_relative() => {
                        SchemaEntry::File(base_dir.join(file))
                    }
                    SchemaSource::File { file } => SchemaEntry::File(file),
                };
                (shape_type, entry)
            })
            .collect();

        Ok(LoadedConfig { verifier: manifest.verifier, connectors, connections, schemas })
    }
}

fn build_connector(id: &str, config: &ConnectorConfig) -> ConfigResult<Connector> {
    let mut actions: Vec<ConnectorAction> = Vec::with_capacity(config.actions.len());
    for action in &config.actions {
        if actions.iter().any(|a| a.id() == action.id) {
            return Err(ConfigError::Validation(format!(
                "Connector '{}' declares action '{}' more than once",
                id, action.id
            )));
        }
        actions.push(ConnectorAction {
            name: action.name.clone(),
            tags: action.tags.clone(),
            definition: build_definition(config, action)?,
        });
    }

    Ok(Connector {
        id: id.to_string(),
        name: config.name.clone(),
        description: config.description.clone(),
        actions,
    })
}

/// Resolve step property references against the connector catalog.
fn build_definition(
    connector: &ConnectorConfig,
    action: &ActionConfig,
) -> Result<ActionDefinition, ConfigurationError> {
    let mut builder = ActionDefinition::builder(action.id.clone());
    if let Some(shape) = &action.input_data_shape {
        builder = builder.input_data_shape(shape.clone());
    }
    if let Some(shape) = &action.output_data_shape {
        builder = builder.output_data_shape(shape.clone());
    }

    for step in &action.steps {
        let mut properties = Vec::with_capacity(step.properties.len());
        for name in &step.properties {
            let property = connector.properties.get(name).ok_or_else(|| {
                ConfigurationError::malformed(
                    &action.id,
                    format!("step '{}' refers to unknown property '{}'", step.title, name),
                )
            })?;
            properties.push((name.clone(), property.clone()));
        }
        builder = builder.step(step.title.clone(), step.description.clone(), |s| {
            properties.into_iter().fold(s, |s, (name, property)| s.property(name, property))
        });
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_format_detection() {
        assert_eq!(FileFormat::from_path("dynact.yaml").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path("dynact.yml").unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path("dynact.json").unwrap(), FileFormat::Json);
        assert!(matches!(FileFormat::from_path("dynact.toml"), Err(ConfigError::UnsupportedFormat(_))));
        assert!(matches!(FileFormat::from_path("dynact"), Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_unknown_property_reference_is_malformed() {
        let yaml = r#"
connectors:
  salesforce:
    name: Salesforce
    properties:
      sObjectName: {kind: parameter, required: true}
    actions:
      - id: io.syndesis:salesforce-create-or-update-connector:latest
        name: Create or update
        steps:
          - title: Select Salesforce object
            properties: [sObjectName, sObjectIdName]
"#;
        let err = ConfigLoader::default()
            .parse_content(yaml, FileFormat::Yaml, Path::new("."))
            .unwrap_err();
        match err {
            ConfigError::Template(ConfigurationError::MalformedTemplate { action_id, reason }) => {
                assert_eq!(action_id, "io.syndesis:salesforce-create-or-update-connector:latest");
                assert!(reason.contains("sObjectIdName"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_connection_to_unknown_connector_is_rejected() {
        let json = r#"{"connections": {"5": {"connector": "salesforce"}}}"#;
        let err = ConfigLoader::default()
            .parse_content(json, FileFormat::Json, Path::new("."))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_relative_schema_paths_use_manifest_dir() {
        let yaml = r#"
schemas:
  Contact: {file: schemas/contact.json}
  Account: '{"type":"object"}'
  Lead: {specification: '{"title":"Lead"}'}
"#;
        let loaded = ConfigLoader::default()
            .parse_content(yaml, FileFormat::Yaml, Path::new("/etc/dynact"))
            .unwrap();
        assert_eq!(
            loaded.schemas,
            vec![
                ("Contact".to_string(), SchemaEntry::File(PathBuf::from("/etc/dynact/schemas/contact.json"))),
                ("Account".to_string(), SchemaEntry::Inline(r#"{"type":"object"}"#.to_string())),
                ("Lead".to_string(), SchemaEntry::Inline(r#"{"title":"Lead"}"#.to_string())),
            ]
        );
    }
}
