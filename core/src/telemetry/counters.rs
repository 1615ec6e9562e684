//! telemetry/counters.rs
//! Mutable counters used during aggregation, encoding and decoding.
//!
//! Summary: Collects line, record and byte counts for one run.
//! Converted into an immutable TelemetrySnapshot at the end.
use serde::{Deserialize, Serialize};

/// Deterministic counters collected during a run
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub lines_read: u64,
    pub records_parsed: u64,
    pub records_merged: u64,
    pub states_created: u64,
    pub records_encoded: u64,
    pub records_decoded: u64,
    pub bytes_written: u64,
    pub bytes_read: u64,
    pub trailing_bytes: u64,
}

impl TelemetryCounters {
    /// Record one parsed district line.
    ///
    /// - `merged`: true when the line folded into an existing state
    pub fn add_parsed(&mut self, merged: bool) {
        self.records_parsed += 1;
        if merged {
            self.records_merged += 1;
        } else {
            self.states_created += 1;
        }
    }

    /// Record one encoded record of `wire_len` bytes.
    pub fn add_encoded(&mut self, wire_len: usize) {
        self.records_encoded += 1;
        self.bytes_written += wire_len as u64;
    }

    /// Record one decoded record of `wire_len` bytes.
    pub fn add_decoded(&mut self, wire_len: usize) {
        self.records_decoded += 1;
        self.bytes_read += wire_len as u64;
    }

    /// Bytes left over after the last complete record.
    pub fn add_trailing(&mut self, len: usize) {
        self.trailing_bytes += len as u64;
        self.bytes_read += len as u64;
    }
}
