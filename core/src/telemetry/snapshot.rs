//! telemetry/snapshot.rs
//!
//! Immutable telemetry snapshot for one run.
//!
//! Design notes:
//! - Built from counters and a timer once the run is over.
//! - Serializable so binaries can print it as JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub counters: TelemetryCounters,
    /// records_merged / records_parsed (0 when nothing was parsed)
    pub merge_ratio: f64,
    pub lines_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let merge_ratio = if counters.records_parsed > 0 {
            counters.records_merged as f64 / counters.records_parsed as f64
        } else {
            0.0
        };

        let lines_per_sec = if elapsed.as_secs_f64() > 0.0 {
            counters.lines_read as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            counters: counters.clone(),
            merge_ratio,
            lines_per_sec,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
