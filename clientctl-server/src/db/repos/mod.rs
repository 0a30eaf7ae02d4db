//! Repository implementations for database access
//!
//! Repositories follow these patterns:
//! - One statement per method; no multi-statement transactions
//! - Uniqueness is left to the table constraint (no pre-flight SELECT)

pub mod clients;

pub use clients::ClientRepo;
