//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP requests.

use serde::Deserialize;

/// Request body for the PUT operation (POST /put)
#[derive(Debug, Clone, Deserialize)]
pub struct PutRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    #[serde(default)]
    pub value: String,
}

impl PutRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    /// Length limits are enforced by the store itself.
    pub fn validate(&self) -> Option<String> {
        if self.key.trim().is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        None
    }
}

/// Query parameters for the GET operation (GET /get?key=...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetParams {
    pub key: Option<String>,
}

impl GetParams {
    /// Returns the requested key, or None if it is missing or blank.
    pub fn key(self) -> Option<String> {
        self.key.filter(|k| !k.trim().is_empty())
    }
}
