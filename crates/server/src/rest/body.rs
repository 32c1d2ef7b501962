use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use shared_types::AppError;
use uuid::Uuid;

/// Decode a JSON request body. The `Content-Type` header is not consulted.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejected request body");
        AppError::invalid_json("Invalid JSON")
    })
}

/// Parse a to-do id from its path segment.
pub fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_id("Invalid todo ID"))
}

/// The `{id}` path segment as a to-do id. A segment that fails to decode
/// (for example invalid UTF-8) is `INVALID_ID`, same as one that is not a UUID.
pub struct TodoId(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for TodoId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "rejected id path segment");
                AppError::invalid_id("Invalid todo ID")
            })?;
        parse_id(&raw).map(TodoId)
    }
}
