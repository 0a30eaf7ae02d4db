//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Client id taken from the `{id}` path segment.
///
/// Only plain decimal digits are accepted. A literal too large for a stored
/// id cannot name an existing client, so it is answered with 404 directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientId(pub i64);

impl ClientId {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::InvalidId);
        }
        raw.parse::<i64>().map(Self).map_err(|_| ApiError::NotFound)
    }
}

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;

        Self::parse(&id)
    }
}

/// JSON body whose rejection speaks the API's error envelope.
///
/// An empty body reads as `{}`; the content type is not inspected.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody {
                reason: e.body_text(),
            })?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(raw)
            .map(Self)
            .map_err(|e| ApiError::InvalidBody {
                reason: e.to_string(),
            })
    }
}
