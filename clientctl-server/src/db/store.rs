//! Storage capability shared by every handler

use async_trait::async_trait;

use crate::models::{Client, ClientChanges, NewClient};

/// Database error type
///
/// Unique-constraint violations are split out so the HTTP layer can answer
/// 409 without inspecting driver codes.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}

/// Access to the `clients` table.
///
/// Each method is a single statement; callers compose them into the
/// lookup → validate → write → re-read sequence.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Insert a client, returning the id assigned by storage.
    async fn insert(&self, client: &NewClient) -> Result<i64, DbError>;

    /// All clients, ascending by id.
    async fn list(&self) -> Result<Vec<Client>, DbError>;

    /// A single client, or `None` if the id is unused.
    async fn get(&self, id: i64) -> Result<Option<Client>, DbError>;

    /// Apply the supplied fields and refresh `updated_at`.
    ///
    /// Returns `false` if no row had that id.
    async fn update(&self, id: i64, changes: &ClientChanges) -> Result<bool, DbError>;

    /// Hard-delete a client. Returns `false` if no row had that id.
    async fn delete(&self, id: i64) -> Result<bool, DbError>;
}
