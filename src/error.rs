//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key is longer than the configured limit
    #[error("Key exceeds maximum length ({max} characters)")]
    KeyTooLarge { len: usize, max: usize },

    /// Value is longer than the configured limit
    #[error("Value exceeds maximum length ({max} characters)")]
    ValueTooLarge { len: usize, max: usize },

    /// Key not found in cache
    #[error("Key not found.")]
    KeyNotFound(String),

    /// Request rejected before reaching the store
    #[error("{0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::KeyTooLarge { .. }
            | CacheError::ValueTooLarge { .. }
            | CacheError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            // A miss is a negative result, not a failure: clients read the body status.
            CacheError::KeyNotFound(_) => (StatusCode::OK, self.to_string()),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    fn status_and_body(err: CacheError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = tokio_test::block_on(to_bytes(response.into_body(), usize::MAX)).unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_key_too_large_is_bad_request() {
        let (status, body) = status_and_body(CacheError::KeyTooLarge { len: 300, max: 256 });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "ERROR");
        assert_eq!(
            body["message"],
            "Key exceeds maximum length (256 characters)"
        );
    }

    #[test]
    fn test_key_not_found_is_ok_with_error_status() {
        let (status, body) = status_and_body(CacheError::KeyNotFound("missing".to_string()));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ERROR");
        assert_eq!(body["message"], "Key not found.");
    }

    #[test]
    fn test_invalid_request_passes_message_through() {
        let (status, body) =
            status_and_body(CacheError::InvalidRequest("Key cannot be empty".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Key cannot be empty");
    }
}
