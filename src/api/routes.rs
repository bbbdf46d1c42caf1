//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{any, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{get_handler, health_handler, put_handler, stats_handler, AppState};

/// Largest accepted request body in bytes
pub const MAX_BODY_SIZE: usize = 1024;

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /put` - Store a key-value pair
/// - `GET /get?key=...` - Retrieve a value by key
/// - `GET /stats` - Get cache statistics
/// - `/` - Health check endpoint (any method)
///
/// Any other path is answered by the health check as well.
///
/// # Middleware
/// - Body limit: bodies over 1 KiB are rejected as invalid JSON
/// - CORS: any origin, GET/POST/OPTIONS
/// - Timeout: 10 seconds per request
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/put", post(put_handler))
        .route("/get", get(get_handler))
        .route("/stats", get(stats_handler))
        .route("/", any(health_handler))
        .fallback(health_handler)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(cors)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
