//! Storage bootstrap - database and `clients` table
//!
//! Both steps are idempotent and run before the listener is bound. Any error
//! returned from here is fatal for the process.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection, PgExecutor};

/// Database used to issue `CREATE DATABASE`
const MAINTENANCE_DATABASE: &str = "postgres";

/// SQLSTATE `duplicate_database`
const DUPLICATE_DATABASE: &str = "42P04";

/// Plain identifiers only, so the name can be quoted into DDL safely.
static DATABASE_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("invalid database name regex")
});

const CREATE_CLIENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS clients (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        phone VARCHAR(20) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Storage bootstrap failure
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("invalid database url: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("database url does not name a database")]
    MissingDatabase,

    #[error("unsupported database name '{0}'")]
    InvalidDatabaseName(String),

    #[error("could not reach database server: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("could not create database '{name}': {source}")]
    CreateDatabase {
        name: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("could not create clients table: {0}")]
    CreateTable(#[source] sqlx::Error),
}

/// Make sure the database named in `database_url` exists.
///
/// Connects to the server's maintenance database and creates the target if
/// `pg_database` has no row for it. Losing a creation race to another
/// process counts as success.
pub async fn ensure_database(database_url: &str) -> Result<(), InitError> {
    let options = PgConnectOptions::from_str(database_url).map_err(InitError::InvalidUrl)?;
    let name = options
        .get_database()
        .ok_or(InitError::MissingDatabase)?
        .to_owned();

    if !DATABASE_NAME_RE.is_match(&name) {
        return Err(InitError::InvalidDatabaseName(name));
    }

    let mut conn = PgConnection::connect_with(&options.clone().database(MAINTENANCE_DATABASE))
        .await
        .map_err(InitError::Connect)?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&name)
            .fetch_one(&mut conn)
            .await
            .map_err(InitError::Connect)?;

    if exists {
        tracing::debug!(database = %name, "Database already exists");
    } else {
        let ddl = format!(r#"CREATE DATABASE "{}""#, name);
        match sqlx::query(&ddl).execute(&mut conn).await {
            Ok(_) => tracing::info!(database = %name, "Created database"),
            Err(err) if is_already_created(&err) => {
                tracing::debug!(database = %name, "Database created concurrently");
            }
            Err(source) => return Err(InitError::CreateDatabase { name, source }),
        }
    }

    // Close errors on a bootstrap connection are not worth failing startup for.
    if let Err(err) = conn.close().await {
        tracing::warn!("Failed to close bootstrap connection: {}", err);
    }

    Ok(())
}

/// Create the `clients` table if it is missing.
pub async fn ensure_schema<'e, E>(executor: E) -> Result<(), InitError>
where
    E: PgExecutor<'e>,
{
    tracing::info!("Ensuring clients table...");

    match sqlx::query(CREATE_CLIENTS_TABLE).execute(executor).await {
        Ok(_) => {}
        // Two processes racing on IF NOT EXISTS can trip the catalog's own
        // unique index; the table exists either way.
        Err(err) if is_already_created(&err) => {}
        Err(err) => return Err(InitError::CreateTable(err)),
    }

    tracing::info!("Clients table ready");
    Ok(())
}

fn is_already_created(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|db_err| {
        db_err.is_unique_violation() || db_err.code().as_deref() == Some(DUPLICATE_DATABASE)
    })
}
