use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{aggregate::AggregateError, codec::CodecError};

/// Why an input path was refused before any parsing started.
#[derive(Debug, Error)]
pub enum InputProblem {
    #[error("file does not exist")]
    Missing,

    #[error("not a regular file")]
    NotAFile,

    #[error("{0}")]
    Unreadable(io::Error),
}

/// Unified error covering input/output access, aggregation, codec and reporting.
/// - `From<T>` impls enable `?` across the pipeline.
/// - Variants wrap the module errors unchanged so callers can match on them.
#[derive(Debug, Error)]
pub enum CensusError {
    /// Input path missing, unreadable, or not a regular file.
    #[error("cannot read input {}: {reason}", path.display())]
    InputAccess { path: PathBuf, reason: InputProblem },

    /// Output path cannot be created or written.
    #[error("cannot write output {}: {source}", path.display())]
    OutputAccess { path: PathBuf, source: io::Error },

    /// Parse, merge or line-read failure during aggregation.
    #[error("aggregation failed at {0}")]
    Aggregate(#[from] AggregateError),

    /// Binary record stream failure (not end of stream).
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Report sink failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON rendering failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CensusError {
    pub fn input(path: impl Into<PathBuf>, reason: InputProblem) -> Self {
        CensusError::InputAccess { path: path.into(), reason }
    }

    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CensusError::OutputAccess { path: path.into(), source }
    }
}
