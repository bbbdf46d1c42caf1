//! Cache Module
//!
//! Provides the bounded in-memory store with LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::{LruList, NodeId};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default and upper bound for key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Default and upper bound for value length in bytes
pub const MAX_VALUE_SIZE: usize = 256;
