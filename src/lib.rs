//! Remote Dictionary - an in-memory key/value server
//!
//! Bounded LRU store with capacity eviction on insert and a background
//! monitor that evicts under process memory pressure.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::{Config, MonitorConfig};
pub use tasks::{spawn_pressure_monitor, SystemProbe};
