//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies. Every body carries
//! a `status` of `"OK"` or `"ERROR"` except the health check.

use serde::Serialize;

use crate::cache::CacheStats;

const STATUS_OK: &str = "OK";
const STATUS_ERROR: &str = "ERROR";

/// Response body for the PUT operation (POST /put)
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    pub status: String,
    pub message: String,
}

impl PutResponse {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
            message: "Key inserted/updated successfully.".to_string(),
        }
    }
}

/// Response body for the GET operation (GET /get?key=...)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub status: String,
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
    pub message: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            key: key.into(),
            value: value.into(),
            message: "Key retrieved successfully.".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub status: String,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Entries evicted because the capacity was reached
    pub capacity_evictions: u64,
    /// Entries evicted under memory pressure
    pub pressure_evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Configured capacity, absent in memory-pressure-only mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, max_size: Option<usize>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            hits: stats.hits,
            misses: stats.misses,
            capacity_evictions: stats.capacity_evictions,
            pressure_evictions: stats.pressure_evictions,
            total_entries: stats.total_entries,
            max_size,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in RFC 3339 format
    pub time: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            time: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    /// Error message describing what went wrong
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
        }
    }
}
