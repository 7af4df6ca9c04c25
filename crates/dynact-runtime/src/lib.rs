pub mod engine;
pub mod error;
pub mod merge;
pub mod service;

pub use engine::EnrichmentEngine;
pub use error::{EnrichError, EnrichResult, RuntimeError, RuntimeResult};
pub use merge::merge_values;
pub use service::EnrichmentService;
