pub mod enrichment;
pub mod error;
pub mod message;
pub mod sanitization;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use enrichment::{
    is_set, DataShapeResolver, EnrichmentRequest, NoSchemas, PropertyValues, VerificationResult,
    Verifier,
};
pub use error::{ConfigurationError, CoreError, CoreResult, ResolutionError, VerificationError};
pub use message::{CustomizeError, Message, MessageCustomizer};
pub use store::{ConnectionStore, ConnectorStore};
pub use sanitization::{is_sensitive_field, sanitize_json_value, sanitize_values};
pub use types::{
    ActionDefinition, ActionDefinitionBuilder, ActionDefinitionStep, ConfigurationProperty,
    ConfigurationPropertyBuilder, Connection, Connector, ConnectorAction, DataShape, PropertyValue,
    StepBuilder,
};
