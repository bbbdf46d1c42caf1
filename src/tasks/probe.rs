//! Memory Probes
//!
//! Read-only access to host and process memory figures for the pressure
//! monitor.
//!
//! Process memory is the number of live heap bytes, counted by a global
//! allocator wrapper. Resident set size is not used: freed pages usually stay
//! mapped, so it barely moves after eviction.

use std::alloc::System as SystemAllocator;

use cap::Cap;
use sysinfo::System;

/// Counts every allocation and deallocation made by the process.
#[global_allocator]
static ALLOCATOR: Cap<SystemAllocator> = Cap::new(SystemAllocator, usize::MAX);

/// Bytes currently allocated on the heap by this process.
pub fn allocated_bytes() -> u64 {
    ALLOCATOR.allocated() as u64
}

/// Held by tests that assert on process-wide heap figures, so two of them
/// never fill and drain the heap at the same time.
#[cfg(test)]
pub(crate) static HEAP_MEASUREMENT: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Source of memory samples.
///
/// Both methods return `None` when the figure cannot be read; the monitor
/// substitutes its own defaults.
pub trait MemoryProbe: Send + 'static {
    /// Total installed system memory in bytes.
    fn total_memory(&mut self) -> Option<u64>;

    /// Memory currently held by this process in bytes.
    fn process_memory(&mut self) -> Option<u64>;
}

/// [`MemoryProbe`] reading total memory from `sysinfo` and live heap bytes
/// from the counting allocator.
pub struct SystemProbe {
    system: System,
}

impl SystemProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for SystemProbe {
    fn total_memory(&mut self) -> Option<u64> {
        self.system.refresh_memory();
        // sysinfo reports 0 on unsupported platforms
        match self.system.total_memory() {
            0 => None,
            total => Some(total),
        }
    }

    fn process_memory(&mut self) -> Option<u64> {
        Some(allocated_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;

    #[test]
    fn test_system_probe_reads_this_process() {
        let mut probe = SystemProbe::new();

        let alloc = probe.process_memory().expect("process memory");
        assert!(alloc > 0);

        if sysinfo::IS_SUPPORTED_SYSTEM {
            let total = probe.total_memory().expect("total memory");
            assert!(alloc < total);
        }
    }

    #[tokio::test]
    async fn test_allocated_bytes_fall_after_eviction() {
        const ENTRIES: usize = 10_000;
        const VALUE_SIZE: usize = 4096;
        let _guard = HEAP_MEASUREMENT.lock().await;
        // ~40 MiB of values, far above what parallel tests allocate
        let payload = (ENTRIES * VALUE_SIZE) as u64;

        let mut probe = SystemProbe::new();
        let mut store = CacheStore::new(None, 256, VALUE_SIZE);
        for i in 0..ENTRIES {
            store.put(format!("key{}", i), "v".repeat(VALUE_SIZE)).unwrap();
        }
        let full = probe.process_memory().unwrap();

        assert_eq!(store.evict_batch(ENTRIES), ENTRIES);
        let drained = probe.process_memory().unwrap();

        assert!(
            drained + payload / 2 < full,
            "heap did not shrink: full={} drained={}",
            full,
            drained
        );
    }
}
