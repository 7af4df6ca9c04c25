//! Boundary for connector-specific message customizers.
//!
//! A customizer turns a vendor payload carried by a runtime message into the
//! connector's normalized model. It may only replace the body.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub headers: IndexMap<String, JsonValue>,
    pub body: JsonValue,
}

impl Message {
    pub fn new(body: JsonValue) -> Self {
        Self { headers: IndexMap::new(), body }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.headers.insert(name.into(), value);
        self
    }
}

#[derive(Debug, Error)]
pub enum CustomizeError {
    #[error("unexpected message body: {0}")]
    UnexpectedBody(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub trait MessageCustomizer: Send + Sync {
    /// Name used in logs and registration.
    fn name(&self) -> &str;

    /// Replace `message.body` with the normalized model. Headers are left
    /// untouched.
    fn customize(&self, message: &mut Message) -> Result<(), CustomizeError>;
}
