pub mod env_resolver;
pub mod error;
pub mod loader;
pub mod schema;
pub mod settings;

pub use env_resolver::{EnvResolver, EnvResolverError};
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, FileFormat, LoadedConfig, SchemaEntry};
pub use schema::ConfigManifest;
pub use settings::apply_verifier_env;
