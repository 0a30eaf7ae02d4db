//! Client repository
//!
//! - insert: RETURNING id, email uniqueness left to the constraint
//! - update: COALESCE per column so unsupplied fields keep their value

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::store::{ClientStore, DbError};
use crate::models::{Client, ClientChanges, NewClient};

/// PostgreSQL-backed [`ClientStore`]
#[derive(Clone)]
pub struct ClientRepo {
    pool: PgPool,
}

impl ClientRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for ClientRepo {
    async fn insert(&self, client: &NewClient) -> Result<i64, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO clients (name, email, phone)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Client>, DbError> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, created_at, updated_at
            FROM clients
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn get(&self, id: i64) -> Result<Option<Client>, DbError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn update(&self, id: i64, changes: &ClientChanges) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.phone.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
