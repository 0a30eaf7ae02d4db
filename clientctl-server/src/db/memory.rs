//! In-process [`ClientStore`] for tests
//!
//! Compiled for this crate's own tests and behind the `test-util` feature.
//!
//! Mirrors the table's guarantees: monotonically increasing ids that are never
//! reused, a unique email constraint, and `updated_at` refreshed on update.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::db::store::{ClientStore, DbError};
use crate::models::{Client, ClientChanges, NewClient};

/// Name reported for email collisions, matching PostgreSQL's default
const EMAIL_CONSTRAINT: &str = "clients_email_key";

#[derive(Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<i64, Client>,
}

/// Memory-backed client store
#[derive(Default)]
pub struct MemoryClientStore {
    rows: Mutex<Rows>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations attempted so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every following operation fail like a timed-out pool.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn begin(&self) -> Result<std::sync::MutexGuard<'_, Rows>, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        // A poisoned lock only means another test thread panicked mid-write.
        Ok(self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }
}

impl Rows {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.by_id
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

fn conflict() -> DbError {
    DbError::UniqueViolation {
        constraint: EMAIL_CONSTRAINT.to_owned(),
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn insert(&self, client: &NewClient) -> Result<i64, DbError> {
        let mut rows = self.begin()?;
        if rows.email_taken(&client.email, None) {
            return Err(conflict());
        }

        rows.last_id += 1;
        let id = rows.last_id;
        let now = Utc::now();
        rows.by_id.insert(
            id,
            Client {
                id,
                name: client.name.clone(),
                email: client.email.clone(),
                phone: client.phone.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Client>, DbError> {
        let rows = self.begin()?;
        Ok(rows.by_id.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Client>, DbError> {
        let rows = self.begin()?;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &ClientChanges) -> Result<bool, DbError> {
        let mut rows = self.begin()?;
        if !rows.by_id.contains_key(&id) {
            return Ok(false);
        }
        if let Some(email) = &changes.email {
            if rows.email_taken(email, Some(id)) {
                return Err(conflict());
            }
        }

        let Some(client) = rows.by_id.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(name) = &changes.name {
            client.name = name.clone();
        }
        if let Some(email) = &changes.email {
            client.email = email.clone();
        }
        if let Some(phone) = &changes.phone {
            client.phone = phone.clone();
        }
        client.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let mut rows = self.begin()?;
        Ok(rows.by_id.remove(&id).is_some())
    }
}
