//! Memory Pressure Monitor
//!
//! Background task that samples process memory on a timer and, once it
//! exceeds a share of total system memory, evicts least recently used
//! entries in growing batches until usage drops to half the threshold.
//!
//! The loop moves through three phases per tick:
//! - Idle: sleeping until the next sample
//! - Sampling: reading total and process memory
//! - Evicting: batched eviction with a cooldown between batches
//!
//! Eviction passes run inline in the loop, so at most one pass touches the
//! store at a time; each batch holds the store's write lock only for the
//! removal itself.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::config::MonitorConfig;
use crate::tasks::MemoryProbe;

const MIB: u64 = 1024 * 1024;

/// Result of one monitor tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Usage was at or below the threshold
    Idle,
    /// Usage fell to the low-water mark after eviction
    Relieved { evicted: usize, batches: usize },
    /// The store ran empty before usage reached the low-water mark
    Exhausted { evicted: usize, batches: usize },
    /// Usage was over the threshold but the store held nothing to evict
    NothingToEvict,
}

/// Samples memory and drives batch eviction on a shared store.
pub struct PressureMonitor<P> {
    cache: Arc<RwLock<CacheStore>>,
    probe: P,
    config: MonitorConfig,
}

impl<P: MemoryProbe> PressureMonitor<P> {
    pub fn new(cache: Arc<RwLock<CacheStore>>, probe: P, config: MonitorConfig) -> Self {
        Self {
            cache,
            probe,
            config,
        }
    }

    /// Eviction threshold for a given total, in bytes.
    pub fn threshold(&self, total: u64) -> u64 {
        (total as f64 * self.config.threshold_ratio) as u64
    }

    /// Runs forever, sampling every `interval`.
    pub async fn run(mut self) {
        info!(
            "Monitoring memory usage every {:?} (threshold {:.0}% of system memory)",
            self.config.interval,
            self.config.threshold_ratio * 100.0
        );

        loop {
            tokio::time::sleep(self.config.interval).await;
            self.tick().await;
        }
    }

    /// Takes one sample and, if over threshold, runs an eviction pass.
    pub async fn tick(&mut self) -> TickOutcome {
        let total = self.sample_total();
        let threshold = self.threshold(total);
        let alloc = self.sample_alloc();

        debug!(
            "Memory sample: current={}MiB threshold={}MiB",
            alloc / MIB,
            threshold / MIB
        );

        if alloc <= threshold {
            return TickOutcome::Idle;
        }

        if self.cache.read().await.is_empty() {
            debug!(
                "Memory above threshold ({}MiB) with an empty cache, skipping eviction",
                threshold / MIB
            );
            return TickOutcome::NothingToEvict;
        }

        info!(
            "High memory usage detected: {} bytes allocated (threshold: {} bytes). Initiating eviction...",
            alloc, threshold
        );

        let outcome = self.relieve(threshold).await;
        match outcome {
            TickOutcome::Relieved { evicted, batches } => info!(
                "Memory pressure relieved: evicted {} entries in {} batches",
                evicted, batches
            ),
            TickOutcome::Exhausted { evicted, batches } => warn!(
                "Cache exhausted under memory pressure: evicted {} entries in {} batches",
                evicted, batches
            ),
            TickOutcome::Idle | TickOutcome::NothingToEvict => {}
        }
        outcome
    }

    async fn relieve(&mut self, threshold: u64) -> TickOutcome {
        let low_water = threshold / 2;
        let mut batch = self.config.initial_batch.max(1);
        let mut evicted = 0;
        let mut batches = 0;

        loop {
            let removed = {
                let mut cache = self.cache.write().await;
                cache.evict_batch(batch)
            };

            if removed == 0 {
                return TickOutcome::Exhausted { evicted, batches };
            }
            evicted += removed;
            batches += 1;

            tokio::time::sleep(self.config.cooldown).await;

            let alloc = self.sample_alloc();
            if alloc <= low_water {
                return TickOutcome::Relieved { evicted, batches };
            }

            debug!(
                "Still above low-water mark: current={}MiB target={}MiB",
                alloc / MIB,
                low_water / MIB
            );
            batch = batch
                .saturating_mul(self.config.growth_factor)
                .min(self.config.max_batch.max(1));
        }
    }

    fn sample_total(&mut self) -> u64 {
        match self.probe.total_memory() {
            Some(total) => total,
            None => {
                warn!(
                    "Error retrieving system memory, assuming {} bytes",
                    self.config.fallback_total_memory
                );
                self.config.fallback_total_memory
            }
        }
    }

    fn sample_alloc(&mut self) -> u64 {
        match self.probe.process_memory() {
            Some(alloc) => alloc,
            None => {
                warn!("Error retrieving process memory, skipping sample");
                0
            }
        }
    }
}

/// Spawns the memory pressure monitor as a background task.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_pressure_monitor<P: MemoryProbe>(
    cache: Arc<RwLock<CacheStore>>,
    probe: P,
    config: MonitorConfig,
) -> JoinHandle<()> {
    tokio::spawn(PressureMonitor::new(cache, probe, config).run())
}
