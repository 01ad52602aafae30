//! HTTP server layer
//!
//! Axum server with:
//! - CORS (localhost only by default)
//! - Request tracing and timeouts
//! - Graceful shutdown that closes the store
//! - JSON envelopes for success and error responses

pub mod server;
pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;

pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use error::ApiError;
pub use response::ApiResponse;
