//! io.rs
//! File-level entry points: aggregate a district file, write the binary
//! aggregate, open it again for reporting.
//!
//! Design notes:
//! - Input paths are checked (exists, regular file) before any parsing.
//! - Every handle is owned by the function that opens it; writers are
//!   flushed explicitly so a failing flush is reported, then dropped.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::aggregate::{ReadLimit, StateAggregator};
use crate::codec::{write_records_counted, CodecError, DecodedRecord, RecordReader};
use crate::records::StateRecord;
use crate::telemetry::TelemetryCounters;
use crate::types::{CensusError, InputProblem};

/// Canonical input abstraction
pub enum InputSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write>),
    File(PathBuf),
}

/// Refuse missing paths and anything that is not a regular file.
pub fn check_input_path(path: &Path) -> Result<(), CensusError> {
    let meta = fs::metadata(path).map_err(|e| {
        let reason = if e.kind() == io::ErrorKind::NotFound {
            InputProblem::Missing
        } else {
            InputProblem::Unreadable(e)
        };
        CensusError::input(path, reason)
    })?;

    if !meta.is_file() {
        return Err(CensusError::input(path, InputProblem::NotAFile));
    }
    Ok(())
}

/// Normalize input source into a buffered reader
pub fn open_input(src: InputSource) -> Result<Box<dyn BufRead>, CensusError> {
    let reader: Box<dyn BufRead> = match src {
        InputSource::File(p) => {
            check_input_path(&p)?;
            let file = File::open(&p)
                .map_err(|e| CensusError::input(&p, InputProblem::Unreadable(e)))?;
            Box::new(BufReader::new(file))
        }
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a buffered writer
pub fn open_output(sink: OutputSink) -> Result<Box<dyn Write>, CensusError> {
    let writer: Box<dyn Write> = match sink {
        OutputSink::Writer(w) => Box::new(BufWriter::new(w)),
        OutputSink::File(p) => {
            let file = File::create(&p).map_err(|e| CensusError::output(&p, e))?;
            Box::new(BufWriter::new(file))
        }
    };
    Ok(writer)
}

// ================= Aggregate side =================

/// Aggregate any line source, keeping the aggregator (and its counters).
pub fn aggregate_source(src: InputSource, limit: ReadLimit) -> Result<StateAggregator, CensusError> {
    let reader = open_input(src)?;
    let mut agg = StateAggregator::new();
    agg.extend_reader(reader, limit)?;

    info!(
        "aggregated {} lines into {} states",
        agg.lines_consumed(),
        agg.len()
    );
    Ok(agg)
}

/// Aggregate a district file into per-state records, in first-seen order.
pub fn aggregate_file(path: impl AsRef<Path>, limit: ReadLimit) -> Result<Vec<StateRecord>, CensusError> {
    let agg = aggregate_source(InputSource::File(path.as_ref().to_path_buf()), limit)?;
    Ok(agg.into_records())
}

/// Write records to `sink`. Returns bytes written.
pub fn write_sink(
    sink: OutputSink,
    records: &[StateRecord],
    counters: &mut TelemetryCounters,
) -> Result<u64, CensusError> {
    let path = match &sink {
        OutputSink::File(p) => Some(p.clone()),
        OutputSink::Writer(_) => None,
    };
    let as_output_error = |e: io::Error| match &path {
        Some(p) => CensusError::output(p, e),
        None => CensusError::Io(e),
    };

    let before = counters.bytes_written;
    let mut w = open_output(sink)?;
    write_records_counted(&mut w, records, counters).map_err(|CodecError::Io(e)| as_output_error(e))?;
    w.flush().map_err(as_output_error)?;

    Ok(counters.bytes_written - before)
}

/// Encode `records` into a new file at `path`, replacing any existing file.
pub fn write_aggregate(path: impl AsRef<Path>, records: &[StateRecord]) -> Result<u64, CensusError> {
    let path = path.as_ref();
    let mut counters = TelemetryCounters::default();
    let bytes = write_sink(OutputSink::File(path.to_path_buf()), records, &mut counters)?;

    info!("wrote {} records ({bytes} bytes) to {}", records.len(), path.display());
    Ok(bytes)
}

// ================= Report side =================

/// Open an aggregate file for lazy decoding, bounded by `limit`.
pub fn open_aggregate(
    path: impl AsRef<Path>,
    limit: ReadLimit,
) -> Result<RecordReader<BufReader<File>>, CensusError> {
    let path = path.as_ref();
    check_input_path(path)?;
    let file = File::open(path).map_err(|e| CensusError::input(path, InputProblem::Unreadable(e)))?;
    Ok(RecordReader::with_limit(BufReader::new(file), limit))
}

/// Decode an aggregate file into memory.
pub fn read_aggregate(path: impl AsRef<Path>, limit: ReadLimit) -> Result<Vec<DecodedRecord>, CensusError> {
    let reader = open_aggregate(path, limit)?;
    let records = reader.collect::<Result<Vec<_>, _>>()?;
    info!("decoded {} records", records.len());
    Ok(records)
}
