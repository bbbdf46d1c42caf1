//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /put` - Store a key-value pair
//! - `GET /get?key=...` - Retrieve a value by key
//! - `GET /stats` - Get cache statistics
//! - `GET /` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
