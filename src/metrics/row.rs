use serde::Serialize;

/// A single row of one run's metrics log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRow {
    pub iteration: u64,
    /// Seconds spent on this iteration.
    pub elapsed_time: f64,
    pub value: f64,
}

/// The trimmed rows of one run, in log order.
pub type RunLog = Vec<MetricRow>;

/// Column-wise mean over all runs at one row index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AveragedRow {
    pub iteration: f64,
    pub mean_elapsed_time: f64,
    pub mean_value: f64,
}
