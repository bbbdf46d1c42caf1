//! Cache Entry Module
//!
//! Defines the record stored in each recency-list node.

// == Cache Entry ==
/// A key/value pair held by the cache.
///
/// The key is kept alongside the value so that evicting the list tail can
/// also remove the matching map slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }
}
