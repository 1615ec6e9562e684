//! aggregate/mod.rs
//! Public module export for per-state aggregation.

pub mod aggregator;
pub mod limit;

pub use aggregator::*;
pub use limit::*;
