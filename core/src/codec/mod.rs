//! codec/mod.rs
//! Binary aggregate format: fixed 28-byte big-endian records.
//!
//! Notes:
//! - Layout per record: four i32 counts, the f64 poverty percentage, then
//!   four reserved zero bytes.
//! - No file header, no record count, no separators.
//! - Files from the legacy writer use 24-byte records with no reserved tail
//!   and are not readable here; their bytes misalign after the first record.
//! - The aggregate file is the only thing exchanged between the analyzer
//!   and the report stage.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
