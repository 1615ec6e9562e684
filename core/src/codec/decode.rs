//! codec/decode.rs
//!
//! Record decoding utilities.
//!
//! Design notes:
//! - Reads fixed 28-byte big-endian blocks; field order matches `encode.rs`.
//! - The stream has no record count. Decoding stops at end of stream or at
//!   the caller's limit, whichever comes first.
//! - End of stream inside a record is a clean stop, not an error. The
//!   leftover bytes are counted and logged.

use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::aggregate::ReadLimit;
use crate::codec::types::{offsets, CodecError, DecodedRecord, WireRecord};
use crate::constants::RECORD_WIRE_LEN;
use crate::telemetry::TelemetryCounters;

/// Decode one wire block. The stored percentage is returned verbatim.
#[inline]
pub fn decode_record(wire: &WireRecord) -> DecodedRecord {
    DecodedRecord {
        state_code: BigEndian::read_i32(&wire[offsets::STATE_CODE..]),
        total_population: BigEndian::read_i32(&wire[offsets::TOTAL_POPULATION..]),
        child_population: BigEndian::read_i32(&wire[offsets::CHILD_POPULATION..]),
        child_poverty_population: BigEndian::read_i32(&wire[offsets::CHILD_POVERTY_POPULATION..]),
        child_poverty_percentage: BigEndian::read_f64(&wire[offsets::CHILD_POVERTY_PERCENTAGE..]),
    }
}

/// Decode every complete record in `bytes`; a trailing partial record is ignored.
pub fn decode_records(bytes: &[u8]) -> Vec<DecodedRecord> {
    bytes
        .chunks_exact(RECORD_WIRE_LEN)
        .map(|chunk| {
            let mut wire = [0u8; RECORD_WIRE_LEN];
            wire.copy_from_slice(chunk);
            decode_record(&wire)
        })
        .collect()
}

/// Lazy record-by-record decoder over any byte source.
#[derive(Debug)]
pub struct RecordReader<R: Read> {
    inner: R,
    limit: ReadLimit,
    decoded: usize,
    done: bool,
    counters: TelemetryCounters,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_limit(inner, ReadLimit::All)
    }

    pub fn with_limit(inner: R, limit: ReadLimit) -> Self {
        Self {
            inner,
            limit,
            decoded: 0,
            done: false,
            counters: TelemetryCounters::default(),
        }
    }

    /// Next record, or `Ok(None)` once the stream or the limit is exhausted.
    pub fn read_record(&mut self) -> Result<Option<DecodedRecord>, CodecError> {
        if self.done || !self.limit.allows(self.decoded) {
            self.done = true;
            return Ok(None);
        }

        let mut wire = [0u8; RECORD_WIRE_LEN];
        let filled = match read_exact_or_eof(&mut self.inner, &mut wire) {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Err(e.into());
            }
        };

        if filled < RECORD_WIRE_LEN {
            self.done = true;
            if filled > 0 {
                debug!("stream ended {filled} bytes into record {}", self.decoded + 1);
                self.counters.add_trailing(filled);
            }
            return Ok(None);
        }

        self.decoded += 1;
        self.counters.add_decoded(RECORD_WIRE_LEN);
        Ok(Some(decode_record(&wire)))
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<DecodedRecord, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Fill `buf` from `r`, stopping early only at end of stream.
/// Returns the number of bytes filled.
fn read_exact_or_eof<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut off = 0;
    while off < buf.len() {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(off)
}
