//! constants.rs
//! Contract constants shared by the parser, the aggregator and the codec.
//!
//! Design notes:
//! - Field offsets are fixed by the census-bureau district file layout.
//!   The layout is not self-describing, so these numbers are the contract.
//! - A wire record is the five encoded fields plus a reserved zero tail.

/// Byte span `[start, end)` of one fixed-width field in an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl FieldSpan {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// District file layout (byte offsets, zero based, end exclusive).
pub mod fields {
    use super::FieldSpan;

    pub const STATE_CODE: FieldSpan               = FieldSpan::new("state_code", 0, 2);
    pub const TOTAL_POPULATION: FieldSpan         = FieldSpan::new("total_population", 82, 90);
    pub const CHILD_POPULATION: FieldSpan         = FieldSpan::new("child_population", 91, 99);
    pub const CHILD_POVERTY_POPULATION: FieldSpan = FieldSpan::new("child_poverty_population", 100, 108);
}

/// Encoded size of one record: four i32, one f64, then four reserved zero bytes.
pub const RECORD_WIRE_LEN: usize = 4 * 4 + 8 + RESERVED_WIRE_LEN;

/// Zero padding closing every wire record. Ignored on decode.
pub const RESERVED_WIRE_LEN: usize = 4;

/// Slot count of the legacy fixed-size state table (50 states + territories).
/// Only used as an allocation hint and a warning threshold.
pub const LEGACY_STATE_CAPACITY: usize = 60;

/// Percentage scale applied to the poverty ratio.
pub const PERCENT_SCALE: f64 = 100.0;
