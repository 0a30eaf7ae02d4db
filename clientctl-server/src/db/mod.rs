//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - Handlers reach storage only through the [`ClientStore`] capability
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Driver errors are classified once, in `From<sqlx::Error> for DbError`

pub mod init;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod pool;
pub mod repos;
pub mod store;

pub use init::{ensure_database, ensure_schema, InitError};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryClientStore;
pub use pool::{PoolSettings, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
pub use repos::ClientRepo;
pub use store::{ClientStore, DbError};
