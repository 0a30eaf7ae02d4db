//! clientctl-server: HTTP API for client records
//!
//! Exposes create/list/get/update/delete over a single PostgreSQL table,
//! plus a liveness endpoint. Storage is reached through the [`db::ClientStore`]
//! capability so handlers never touch a global pool.

pub mod db;
pub mod http;
pub mod models;

pub use db::{ClientStore, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig};
