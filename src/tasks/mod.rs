//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Memory pressure monitor: evicts LRU entries when process memory runs high

mod pressure;
mod probe;

pub use pressure::{spawn_pressure_monitor, PressureMonitor, TickOutcome};
pub use probe::{allocated_bytes, MemoryProbe, SystemProbe};
