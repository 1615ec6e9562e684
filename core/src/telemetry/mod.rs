//! telemetry/mod.rs
//! Unified telemetry module: counters, timers, and immutable snapshots.
//!
//! Notes:
//! - Counters are plain fields updated by the single owning run.
//! - Snapshots are taken once, after the run, and are serde-serializable.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
