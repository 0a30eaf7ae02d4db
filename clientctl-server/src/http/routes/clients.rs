//! Client endpoints
//!
//! Each handler is an early-return chain: id syntax, existence, validation,
//! write, re-read. The first failing step decides the response.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::ClientStore;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ClientId};
use crate::http::server::AppState;
use crate::models::{Client, ClientPayload};

/// Single-record envelope
#[derive(Serialize)]
pub struct ClientResponse {
    pub message: &'static str,
    pub client: Client,
}

/// List envelope
#[derive(Serialize)]
pub struct ClientListResponse {
    pub message: &'static str,
    pub clients: Vec<Client>,
}

/// Confirmation without payload
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Fetch a client or answer 404.
async fn existing(store: &dyn ClientStore, id: i64) -> Result<Client, ApiError> {
    store.get(id).await?.ok_or(ApiError::NotFound)
}

/// POST /clients - create a client
async fn create_client(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ClientPayload>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiError> {
    let new_client = payload.into_new_client()?;

    let id = state.store.insert(&new_client).await?;
    let client = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| ApiError::Internal {
            message: format!("client {} missing right after insert", id),
        })?;

    tracing::info!(client_id = id, "Client created");
    Ok((
        StatusCode::CREATED,
        Json(ClientResponse {
            message: "Client created successfully",
            client,
        }),
    ))
}

/// GET /clients - list every client by ascending id
async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClientListResponse>, ApiError> {
    let clients = state.store.list().await?;

    Ok(Json(ClientListResponse {
        message: "Clients listed successfully",
        clients,
    }))
}

/// GET /clients/{id} - get a single client
async fn get_client(
    State(state): State<Arc<AppState>>,
    ClientId(id): ClientId,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = existing(state.store.as_ref(), id).await?;

    Ok(Json(ClientResponse {
        message: "Client found",
        client,
    }))
}

/// PUT /clients/{id} - partial update
///
/// Existence is checked before the body is validated, so a bad email on an
/// unknown id is a 404.
async fn update_client(
    State(state): State<Arc<AppState>>,
    ClientId(id): ClientId,
    ApiJson(payload): ApiJson<ClientPayload>,
) -> Result<Json<ClientResponse>, ApiError> {
    existing(state.store.as_ref(), id).await?;

    let changes = payload.into_changes()?;
    if changes.is_empty() {
        return Err(ApiError::NothingToUpdate);
    }

    // A concurrent delete between lookup and write leaves nothing to update.
    if !state.store.update(id, &changes).await? {
        return Err(ApiError::NotFound);
    }
    let client = existing(state.store.as_ref(), id).await?;

    tracing::info!(client_id = id, "Client updated");
    Ok(Json(ClientResponse {
        message: "Client updated successfully",
        client,
    }))
}

/// DELETE /clients/{id} - hard delete
async fn delete_client(
    State(state): State<Arc<AppState>>,
    ClientId(id): ClientId,
) -> Result<Json<MessageResponse>, ApiError> {
    existing(state.store.as_ref(), id).await?;

    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound);
    }

    tracing::info!(client_id = id, "Client deleted");
    Ok(Json(MessageResponse {
        message: "Client deleted successfully",
    }))
}

/// Client routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
}
