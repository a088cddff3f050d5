//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the response cache.
///
/// `NotFound` and `Expired` are part of the normal miss flow and are collapsed
/// into [`Lookup::Miss`](crate::cache::Lookup) by the cache manager. Storage
/// failures and timeouts are always surfaced unchanged.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not present in the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key present but past its TTL
    #[error("Key expired: {0}")]
    Expired(String),

    /// Storage I/O or connection failure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Operation exceeded the caller's deadline
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Rejected input (empty key, zero TTL, oversized value)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) | CacheError::Expired(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the response cache.
pub type Result<T> = std::result::Result<T, CacheError>;
