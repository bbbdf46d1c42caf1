//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};

/// Total memory assumed when the host cannot report it (2 GiB).
pub const FALLBACK_TOTAL_MEMORY: u64 = 2 * 1024 * 1024 * 1024;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub port: u16,
    /// Entry capacity; `None` selects memory-pressure-only mode
    pub max_cache_size: Option<usize>,
    /// Maximum key length in bytes (at most 256)
    pub max_key_size: usize,
    /// Maximum value length in bytes (at most 256)
    pub max_value_size: usize,
    /// Seconds between memory samples
    pub memory_check_interval: u64,
    /// Share of total system memory that triggers eviction, in percent
    pub memory_threshold_percent: u8,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 7171)
    /// - `MAX_CACHE_SIZE` - Entry capacity (default: unset, unbounded)
    /// - `MAX_KEY_SIZE` - Key length limit, capped at 256 (default: 256)
    /// - `MAX_VALUE_SIZE` - Value length limit, capped at 256 (default: 256)
    /// - `MEMORY_CHECK_INTERVAL` - Memory sampling interval in seconds (default: 1)
    /// - `MEMORY_THRESHOLD_PERCENT` - Eviction trigger, 1-100 (default: 70)
    pub fn from_env() -> Self {
        // Missing .env is the normal case
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Self {
            port: parse_var("PORT").unwrap_or(defaults.port),
            max_cache_size: parse_var::<usize>("MAX_CACHE_SIZE").filter(|&n| n > 0),
            max_key_size: capped_size("MAX_KEY_SIZE", MAX_KEY_LENGTH),
            max_value_size: capped_size("MAX_VALUE_SIZE", MAX_VALUE_SIZE),
            memory_check_interval: parse_var::<u64>("MEMORY_CHECK_INTERVAL")
                .map(|secs| secs.max(1))
                .unwrap_or(defaults.memory_check_interval),
            memory_threshold_percent: parse_var::<u8>("MEMORY_THRESHOLD_PERCENT")
                .filter(|p| (1..=100).contains(p))
                .unwrap_or(defaults.memory_threshold_percent),
        }
    }

    /// Builds the pressure monitor settings from this configuration.
    pub fn monitor(&self) -> MonitorConfig {
        MonitorConfig {
            interval: Duration::from_secs(self.memory_check_interval),
            threshold_ratio: f64::from(self.memory_threshold_percent) / 100.0,
            ..MonitorConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 7171,
            max_cache_size: None,
            max_key_size: MAX_KEY_LENGTH,
            max_value_size: MAX_VALUE_SIZE,
            memory_check_interval: 1,
            memory_threshold_percent: 70,
        }
    }
}

/// Memory pressure monitor tuning.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Time between samples while idle
    pub interval: Duration,
    /// Fraction of total memory above which eviction starts
    pub threshold_ratio: f64,
    /// Pause between eviction batches, taken outside the store lock
    pub cooldown: Duration,
    /// First batch size of an eviction pass
    pub initial_batch: usize,
    /// Multiplier applied to the batch size after each batch
    pub growth_factor: usize,
    /// Upper bound on a single batch
    pub max_batch: usize,
    /// Total memory assumed when the probe cannot read it
    pub fallback_total_memory: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            threshold_ratio: 0.70,
            cooldown: Duration::from_millis(100),
            initial_batch: 5,
            growth_factor: 10,
            max_batch: 1000,
            fallback_total_memory: FALLBACK_TOTAL_MEMORY,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Invalid {}={:?}, using default", name, raw);
            None
        }
    }
}

fn capped_size(name: &str, limit: usize) -> usize {
    match parse_var::<usize>(name) {
        Some(value) if value > limit => {
            warn!("{} exceeds limit of {}, using {}", name, limit, limit);
            limit
        }
        Some(value) => value,
        None => limit,
    }
}
