//! Error taxonomy shared by the metrics reducer and the sample extractor.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the analysis pipelines.
///
/// Only [`AnalysisError::MissingRun`] is recoverable: the run locator counts it
/// and lowers the averaging denominator. Everything else aborts the command.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A run's metrics log does not exist.
    #[error("metrics log not found at {}", path.display())]
    MissingRun { path: PathBuf },

    /// Every requested run was missing.
    #[error("none of the {requested} requested runs has a metrics log under {}", base.display())]
    NoRuns { requested: usize, base: PathBuf },

    /// A metrics row could not be parsed.
    #[error("parse error at {}:{line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Run logs being averaged have different row counts.
    #[error("run log {index} has {actual} rows, expected {expected}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A summary figure would divide by zero, or there is nothing to reduce.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// A binary stream ended before the requested record count was read.
    #[error("{stream} stream truncated at record {record} (wanted {wanted} bytes, got {got})")]
    TruncatedStream {
        stream: &'static str,
        record: usize,
        wanted: usize,
        got: usize,
    },

    /// The accepted class pair is not two distinct values.
    #[error("positive and negative class must differ (both are {0})")]
    InvalidClasses(u8),

    /// Reading a binary stream failed for a reason other than running short.
    #[error("reading {stream} stream: {source}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
