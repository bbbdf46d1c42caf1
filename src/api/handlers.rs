//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    Json,
};
use tracing::warn;

use crate::cache::CacheStore;
use crate::error::{CacheError, Result};
use crate::models::{
    GetParams, GetResponse, HealthResponse, PutRequest, PutResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Contains the cache store wrapped in Arc<RwLock<>> for thread-safe access.
/// The same handle is given to the memory pressure monitor.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Initializes the cache store with parameters from the Config.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let cache = CacheStore::new(
            config.max_cache_size,
            config.max_key_size,
            config.max_value_size,
        );
        Self::new(cache)
    }
}

/// Handler for POST /put
///
/// Stores a key-value pair. The body is parsed as JSON regardless of the
/// declared content type.
pub async fn put_handler(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<PutResponse>> {
    let req: PutRequest = body
        .map_err(|e| e.to_string())
        .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|e| e.to_string()))
        .map_err(|e| {
            warn!("Error parsing JSON: {}", e);
            CacheError::InvalidRequest("Invalid JSON format".to_string())
        })?;

    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.put(req.key, req.value)?;

    Ok(Json(PutResponse::ok()))
}

/// Handler for GET /get?key=...
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(params): Query<GetParams>,
) -> Result<Json<GetResponse>> {
    let key = params
        .key()
        .ok_or_else(|| CacheError::InvalidRequest("Key parameter is missing".to_string()))?;

    // Acquire write lock (needed for LRU promotion and stats update)
    let value = state.cache.write().await.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;

    Json(StatsResponse::new(&cache.stats(), cache.max_size()))
}

/// Handler for GET /
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(max_size: Option<usize>) -> AppState {
        AppState::new(CacheStore::new(max_size, 100, 100))
    }

    fn body(json: &str) -> std::result::Result<Bytes, BytesRejection> {
        Ok(Bytes::from(json.to_string()))
    }

    fn query(key: &str) -> Query<GetParams> {
        Query(GetParams {
            key: Some(key.to_string()),
        })
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = test_state(None);

        let result = put_handler(State(state.clone()), body(r#"{"key":"test","value":"v"}"#)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), query("test")).await.unwrap();
        assert_eq!(response.key, "test");
        assert_eq!(response.value, "v");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state(None);

        let result = get_handler(State(state), query("missing")).await;
        assert!(matches!(result, Err(CacheError::KeyNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_missing_key_param() {
        let state = test_state(None);

        let result = get_handler(State(state), Query(GetParams::default())).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_put_empty_key() {
        let state = test_state(None);

        let result = put_handler(State(state), body(r#"{"key":"","value":"v"}"#)).await;
        assert_eq!(
            result.err(),
            Some(CacheError::InvalidRequest("Key cannot be empty".to_string()))
        );
    }

    #[tokio::test]
    async fn test_put_invalid_json() {
        let state = test_state(None);

        let result = put_handler(State(state.clone()), body(r#"{"key":"#)).await;
        assert_eq!(
            result.err(),
            Some(CacheError::InvalidRequest("Invalid JSON format".to_string()))
        );
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_put_key_too_large() {
        let state = test_state(None);
        let json = format!(r#"{{"key":"{}","value":"v"}}"#, "k".repeat(101));

        let result = put_handler(State(state), body(&json)).await;
        assert!(matches!(result, Err(CacheError::KeyTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state(Some(1));
        put_handler(State(state.clone()), body(r#"{"key":"a","value":"1"}"#))
            .await
            .unwrap();
        put_handler(State(state.clone()), body(r#"{"key":"b","value":"2"}"#))
            .await
            .unwrap();
        let _ = get_handler(State(state.clone()), query("a")).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 1);
        assert_eq!(response.capacity_evictions, 1);
        assert_eq!(response.total_entries, 1);
        assert_eq!(response.max_size, Some(1));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
