//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS headers on every response, OPTIONS short-circuit
//! - Request tracing
//! - Graceful shutdown
//! - JSON error envelopes

pub mod cors;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
