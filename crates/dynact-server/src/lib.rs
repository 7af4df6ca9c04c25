//! Dynact Server
//!
//! REST endpoints that return action definitions enriched for a stored
//! connection.

pub mod app_state;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod restapi;

pub use app_state::AppState;
pub use error::{ServerError, ServerResult};
pub use restapi::{create_router, serve};
