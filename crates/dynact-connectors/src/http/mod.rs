pub mod settings;
pub mod timeout_manager;
pub mod verifier;

pub use settings::{TimeoutConfig, VerifierSettings};
pub use timeout_manager::TimeoutManager;
pub use verifier::HttpVerifier;
