//! API error types with IntoResponse
//!
//! Every failure becomes `{ "error": ..., "details"?: [...] }` with the
//! matching status code. Storage details never leave the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationErrors;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// One or more field rules failed (400)
    Validation(ValidationErrors),

    /// Path id is not a non-negative integer literal (400)
    InvalidId,

    /// Body is not JSON of the expected shape (400)
    InvalidBody { reason: String },

    /// Update body named no known field (400)
    NothingToUpdate,

    /// No client with that id (404)
    NotFound,

    /// No route matched (404)
    RouteNotFound,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Email already used by another client (409)
    Conflict,

    /// Storage failure (500, logged)
    Database(DbError),

    /// Unexpected state (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId | Self::InvalidBody { .. } | Self::NothingToUpdate => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(errors) => json!({
                "error": "Invalid data",
                "details": errors.iter().map(ToString::to_string).collect::<Vec<_>>()
            }),
            Self::InvalidId => json!({ "error": "ID must be a valid number" }),
            Self::InvalidBody { reason } => json!({
                "error": "Invalid JSON body",
                "details": [reason]
            }),
            Self::NothingToUpdate => json!({ "error": "No fields to update were provided" }),
            Self::NotFound => json!({ "error": "Client not found" }),
            Self::RouteNotFound => json!({ "error": "Route not found" }),
            Self::MethodNotAllowed => json!({ "error": "Method not allowed" }),
            Self::Conflict => json!({ "error": "Email is already in use" }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                json!({ "error": "Internal server error" })
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::UniqueViolation { constraint } => {
                tracing::debug!(%constraint, "Unique constraint rejected write");
                Self::Conflict
            }
            _ => Self::Database(e),
        }
    }
}
