//! Error types for the caching backend
//!
//! Provides unified error handling using thiserror. Each layer owns its own
//! enum: the cache, the upstream catalog, and the HTTP API that maps both
//! into responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by the bounded cache.
///
/// `InvalidCapacity` and `InvalidTtl` are construction-time failures and are
/// fatal at startup. `KeyTooLong` is the only failure a write can hit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be a positive number of entries
    #[error("Invalid cache capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    /// TTL must be a positive duration the clock can represent
    #[error("Invalid cache TTL: must be greater than zero and fit the clock's range")]
    InvalidTtl,

    /// Key exceeds the maximum allowed length
    #[error("Key exceeds maximum length of {max} bytes (got {len})")]
    KeyTooLong { len: usize, max: usize },
}

// == Catalog Error Enum ==
/// Errors raised by a catalog source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no item for the given id or name
    #[error("Pokemon not found: {0}")]
    NotFound(String),

    /// Upstream answered with a non-success status
    #[error("Catalog returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// Network failure or upstream timeout
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// Upstream payload could not be decoded
    #[error("Malformed catalog payload: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Returns true when the catalog reported the item as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

// == API Error Enum ==
/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Requested item does not exist upstream
    #[error("{0}")]
    NotFound(String),

    /// Upstream catalog failure
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Request deadline exceeded
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Result type for catalog source calls.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
