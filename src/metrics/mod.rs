//! Per-run metrics logs: loading, trimming and cross-run averaging.

pub mod parse;
pub mod reduce;
pub mod row;

pub use reduce::{DEFAULT_RUN_COUNT, accumulate_time, average, locate_runs};
pub use row::AveragedRow;
