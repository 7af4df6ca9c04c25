pub mod error;
pub mod memory;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use memory::{MemoryConnectionStore, MemoryConnectorStore};
pub use schema::MemorySchemaCatalog;
