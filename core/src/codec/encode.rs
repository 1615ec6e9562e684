//! codec/encode.rs
//!
//! Record encoding utilities.
//!
//! Design notes:
//! - Serializes each `StateRecord` into a fixed 28-byte big-endian block.
//! - Field order must match `decode.rs` exactly.
//! - No header, no length prefix, no separator between records.

use std::io::Write;

use byteorder::{BigEndian, ByteOrder};

use crate::codec::types::{offsets, CodecError, WireRecord};
use crate::constants::RECORD_WIRE_LEN;
use crate::records::StateRecord;
use crate::telemetry::TelemetryCounters;

/// Encode one record into its wire block.
///
/// Layout:
///
/// ```text
/// [ state_code (4) ]
/// [ total_population (4) ]
/// [ child_population (4) ]
/// [ child_poverty_population (4) ]
/// [ child_poverty_percentage (8, f64) ]
/// [ reserved (4, zero) ]
/// ```
pub fn encode_record(record: &StateRecord) -> WireRecord {
    let mut out = [0u8; RECORD_WIRE_LEN];

    BigEndian::write_i32(&mut out[offsets::STATE_CODE..], record.state_code());
    BigEndian::write_i32(&mut out[offsets::TOTAL_POPULATION..], record.total_population());
    BigEndian::write_i32(&mut out[offsets::CHILD_POPULATION..], record.child_population());
    BigEndian::write_i32(&mut out[offsets::CHILD_POVERTY_POPULATION..], record.child_poverty_population());
    BigEndian::write_f64(&mut out[offsets::CHILD_POVERTY_PERCENTAGE..], record.child_poverty_percentage());

    out
}

/// Stream records into `w`, in order. Returns the number of bytes written.
///
/// Buffering and flushing are the caller's responsibility.
pub fn write_records<'a, W, I>(w: &mut W, records: I) -> Result<u64, CodecError>
where
    W: Write,
    I: IntoIterator<Item = &'a StateRecord>,
{
    let mut counters = TelemetryCounters::default();
    write_records_counted(w, records, &mut counters)?;
    Ok(counters.bytes_written)
}

/// Same as [`write_records`], charging each record to `counters`.
pub fn write_records_counted<'a, W, I>(
    w: &mut W,
    records: I,
    counters: &mut TelemetryCounters,
) -> Result<(), CodecError>
where
    W: Write,
    I: IntoIterator<Item = &'a StateRecord>,
{
    for record in records {
        w.write_all(&encode_record(record))?;
        counters.add_encoded(RECORD_WIRE_LEN);
    }
    Ok(())
}

/// Encode a whole collection into one buffer.
pub fn encode_records<'a, I>(records: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a StateRecord>,
{
    let iter = records.into_iter();
    let mut out = Vec::with_capacity(iter.size_hint().0 * RECORD_WIRE_LEN);
    for record in iter {
        out.extend_from_slice(&encode_record(record));
    }
    out
}
