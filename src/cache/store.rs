//! Cache Store Module
//!
//! Main cache engine: a key index over an arena-backed recency list, bounded
//! by an optional entry capacity and trimmed by the memory-pressure monitor.

use std::collections::HashMap;

use crate::cache::{CacheEntry, CacheStats, LruList, NodeId};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded key/value store with LRU eviction.
///
/// `index` and `lru` are kept in lock-step: every key in the index owns
/// exactly one list node and every node's key is in the index.
#[derive(Debug)]
pub struct CacheStore {
    /// Key -> node handle
    index: HashMap<String, NodeId>,
    /// Entries in recency order
    lru: LruList<CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries, `None` for memory-pressure-only mode
    max_size: Option<usize>,
    /// Maximum key length in bytes
    max_key_size: usize,
    /// Maximum value length in bytes
    max_value_size: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `max_size` - Entry capacity; `None` (or `Some(0)`) disables capacity eviction
    /// * `max_key_size` - Maximum key length in bytes
    /// * `max_value_size` - Maximum value length in bytes
    pub fn new(max_size: Option<usize>, max_key_size: usize, max_value_size: usize) -> Self {
        Self {
            index: HashMap::new(),
            lru: LruList::new(),
            stats: CacheStats::new(),
            max_size: max_size.filter(|&n| n > 0),
            max_key_size,
            max_value_size,
        }
    }

    // == Put ==
    /// Inserts or replaces a value and marks the key most recently used.
    ///
    /// When a capacity is set and the key is new, a full store evicts its
    /// least recently used entry first. On validation errors the store is
    /// left unchanged.
    pub fn put(&mut self, key: String, value: String) -> Result<()> {
        if key.len() > self.max_key_size {
            return Err(CacheError::KeyTooLarge {
                len: key.len(),
                max: self.max_key_size,
            });
        }

        if value.len() > self.max_value_size {
            return Err(CacheError::ValueTooLarge {
                len: value.len(),
                max: self.max_value_size,
            });
        }

        // Overwrite in place
        if let Some(id) = self.index.get(&key).copied() {
            if let Some(entry) = self.lru.get_mut(id) {
                entry.value = value;
            }
            self.lru.move_to_front(id);
            return Ok(());
        }

        // One insert can overflow by at most one entry
        if let Some(max) = self.max_size {
            if self.index.len() >= max && self.evict_one().is_some() {
                self.stats.record_capacity_eviction();
            }
        }

        let id = self.lru.push_front(CacheEntry::new(key.clone(), value));
        self.index.insert(key, id);
        self.stats.set_total_entries(self.index.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Promoting an entry that is already the most recently used is a no-op,
    /// so repeated lookups never disturb the list.
    pub fn get(&mut self, key: &str) -> Result<String> {
        let Some(id) = self.index.get(key).copied() else {
            self.stats.record_miss();
            return Err(CacheError::KeyNotFound(key.to_string()));
        };

        self.lru.move_to_front(id);
        match self.lru.get(id) {
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::KeyNotFound(key.to_string()))
            }
        }
    }

    // == Evict One ==
    /// Removes the least recently used entry and returns its key.
    ///
    /// Returns `None` on an empty store.
    pub fn evict_one(&mut self) -> Option<String> {
        let entry = self.lru.pop_back()?;
        self.index.remove(&entry.key);
        self.stats.set_total_entries(self.index.len());
        Some(entry.key)
    }

    // == Evict Batch ==
    /// Removes up to `n` least recently used entries.
    ///
    /// Returns how many were removed, which is less than `n` only when the
    /// store ran empty.
    pub fn evict_batch(&mut self, n: usize) -> usize {
        let mut removed = 0;
        while removed < n && self.evict_one().is_some() {
            removed += 1;
        }
        self.stats.record_pressure_evictions(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    /// Configured entry capacity, if any.
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter().map(|e| e.key.clone()).collect()
    }

    /// Checks that the index and the recency list describe the same entries.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.index.len() == self.lru.len()
            && self.index.iter().all(|(key, &id)| {
                self.lru.get(id).map(|e| &e.key == key).unwrap_or(false)
            })
    }
}
