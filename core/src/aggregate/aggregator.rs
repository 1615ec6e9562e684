//! aggregate/aggregator.rs
//!
//! Folds district records into per-state accumulators.
//!
//! Design notes:
//! - Accumulators live in a `Vec` in first-seen order; a `HashMap` maps each
//!   state code to its slot. No fixed ceiling on the number of states.
//! - A merge is validated before it is committed (see `StateRecord::add_populations`).
//! - The first parse or merge failure aborts the whole run.

use std::collections::HashMap;
use std::io::{self, BufRead};

use log::{debug, warn};
use thiserror::Error;

use crate::aggregate::limit::ReadLimit;
use crate::constants::LEGACY_STATE_CAPACITY;
use crate::parser::{parse_line, ParseError};
use crate::records::{RecordError, StateRecord};
use crate::telemetry::TelemetryCounters;

/// Aggregation failures. `line` is the 1-based input line number.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("line {line}: {source}")]
    Parse { line: usize, source: ParseError },

    #[error("line {line}: cannot merge into state {state_code}: {source}")]
    Merge { line: usize, state_code: i32, source: RecordError },

    #[error("line {line}: read failed: {source}")]
    Io { line: usize, source: io::Error },
}

/// What happened to one folded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// First record for this state; a new accumulator was appended.
    Created,
    /// Counts were added into an existing accumulator.
    Merged,
}

/// Ordered collection of per-state accumulators.
#[derive(Debug, Clone)]
pub struct StateAggregator {
    records: Vec<StateRecord>,
    index: HashMap<i32, usize>,
    lines_consumed: usize,
    counters: TelemetryCounters,
}

impl StateAggregator {
    pub fn new() -> Self {
        Self::with_capacity(LEGACY_STATE_CAPACITY)
    }

    pub fn with_capacity(states: usize) -> Self {
        Self {
            records: Vec::with_capacity(states),
            index: HashMap::with_capacity(states),
            lines_consumed: 0,
            counters: TelemetryCounters::default(),
        }
    }

    /// Fold an already-parsed record.
    ///
    /// # Errors
    /// `RecordError` if the merged totals break an invariant; the existing
    /// accumulator is unchanged in that case.
    pub fn push_record(&mut self, record: StateRecord) -> Result<Fold, RecordError> {
        let code = record.state_code();

        let fold = match self.index.get(&code) {
            Some(&slot) => {
                self.records[slot].merge(&record)?;
                debug!("merged district into state {code:02} (slot {slot})");
                Fold::Merged
            }
            None => {
                self.index.insert(code, self.records.len());
                self.records.push(record);
                if self.records.len() == LEGACY_STATE_CAPACITY + 1 {
                    warn!(
                        "state count exceeds legacy capacity of {LEGACY_STATE_CAPACITY}; \
                         older readers with fixed tables may truncate this aggregate"
                    );
                }
                Fold::Created
            }
        };

        self.counters.add_parsed(fold == Fold::Merged);
        Ok(fold)
    }

    /// Parse one input line and fold it in.
    pub fn push_line(&mut self, line: &str) -> Result<Fold, AggregateError> {
        self.lines_consumed += 1;
        self.counters.lines_read += 1;
        let line_no = self.lines_consumed;

        let record = parse_line(line).map_err(|source| AggregateError::Parse { line: line_no, source })?;
        let state_code = record.state_code();
        self.push_record(record)
            .map_err(|source| AggregateError::Merge { line: line_no, state_code, source })
    }

    /// Fold lines from an in-memory source, honouring `limit`.
    ///
    /// Returns the number of lines consumed by this call.
    pub fn extend_lines<I, S>(&mut self, lines: I, limit: ReadLimit) -> Result<usize, AggregateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = self.lines_consumed;
        for line in lines.into_iter().take(limit.as_take()) {
            self.push_line(line.as_ref())?;
        }
        Ok(self.lines_consumed - start)
    }

    /// Fold lines from a buffered reader, honouring `limit`.
    ///
    /// No line past the limit is read from `reader`.
    pub fn extend_reader<R: BufRead>(&mut self, reader: R, limit: ReadLimit) -> Result<usize, AggregateError> {
        let start = self.lines_consumed;
        for line in reader.lines().take(limit.as_take()) {
            let line = line.map_err(|source| AggregateError::Io {
                line: self.lines_consumed + 1,
                source,
            })?;
            self.push_line(&line)?;
        }
        Ok(self.lines_consumed - start)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, state_code: i32) -> Option<&StateRecord> {
        self.index.get(&state_code).map(|&slot| &self.records[slot])
    }

    /// Accumulators in first-seen order.
    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StateRecord> {
        self.records
    }

    pub fn lines_consumed(&self) -> usize {
        self.lines_consumed
    }

    pub fn counters(&self) -> &TelemetryCounters {
        &self.counters
    }
}

impl Default for StateAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate a sequence of district lines into per-state records.
pub fn aggregate_lines<I, S>(lines: I, limit: ReadLimit) -> Result<Vec<StateRecord>, AggregateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut agg = StateAggregator::new();
    agg.extend_lines(lines, limit)?;
    Ok(agg.into_records())
}
