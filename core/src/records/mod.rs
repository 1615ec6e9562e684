//! records/mod.rs
//! Public module export for the state record entity.

pub mod types;

pub use types::*;
