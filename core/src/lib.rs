//! census-core
//!
//! Census child-poverty aggregation engine.
//! Fixed-width district lines in, per-state binary aggregate out, and back.
//!
//! Pipeline: lines -> `parser` -> `aggregate` -> `codec` (encode) -> file
//! -> `codec` (decode) -> `report`.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod records;
pub mod parser;
pub mod aggregate;
pub mod codec;

pub mod io;
pub mod report;
pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::aggregate::{aggregate_lines, AggregateError, ReadLimit, StateAggregator};
    pub use crate::codec::{decode_record, encode_record, DecodedRecord, RecordReader};
    pub use crate::io::{aggregate_file, open_aggregate, read_aggregate, write_aggregate};
    pub use crate::parser::{parse_line, ParseError};
    pub use crate::records::{RecordError, StateRecord};
    pub use crate::report::{render_report, ReportFormat};
    pub use crate::types::CensusError;
}
