//! Domain models with validation at construction
//!
//! Request payloads are turned into [`NewClient`] or [`ClientChanges`] only
//! after every rule has been checked. Invalid input returns the full list of
//! [`ValidationError`]s, not the first one hit.

pub mod client;
pub mod validation;

pub use client::{Client, ClientChanges, ClientPayload, NewClient};
pub use validation::{ValidationError, ValidationErrors};
