//! codec/types.rs
//! Wire-level record view and codec errors.
//!
//! Notes:
//! - `DecodedRecord` is a read-only copy of one 28-byte wire record.
//! - Its percentage is the stored value, not recomputed.

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::constants::RECORD_WIRE_LEN;
use crate::records::StateRecord;

/// Field offsets inside one wire record (big-endian).
pub mod offsets {
    pub const STATE_CODE: usize               = 0;
    pub const TOTAL_POPULATION: usize         = 4;
    pub const CHILD_POPULATION: usize         = 8;
    pub const CHILD_POVERTY_POPULATION: usize = 12;
    pub const CHILD_POVERTY_PERCENTAGE: usize = 16;
    pub const RESERVED: usize                 = 24;
}

/// One encoded record.
pub type WireRecord = [u8; RECORD_WIRE_LEN];

#[derive(Debug, Error)]
pub enum CodecError {
    /// Underlying reader or writer failed (never raised for end of stream).
    #[error("record I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Report-side copy of one stored record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodedRecord {
    pub state_code: i32,
    pub total_population: i32,
    pub child_population: i32,
    pub child_poverty_population: i32,
    pub child_poverty_percentage: f64,
}

impl DecodedRecord {
    /// True when the integer fields equal `record` and the stored percentage
    /// matches the derived one within `tolerance` (NaN matches NaN).
    pub fn matches(&self, record: &StateRecord, tolerance: f64) -> bool {
        let expected = record.child_poverty_percentage();
        let pct_ok = if expected.is_nan() {
            self.child_poverty_percentage.is_nan()
        } else {
            (self.child_poverty_percentage - expected).abs() <= tolerance
        };

        pct_ok
            && self.state_code == record.state_code()
            && self.total_population == record.total_population()
            && self.child_population == record.child_population()
            && self.child_poverty_population == record.child_poverty_population()
    }
}
