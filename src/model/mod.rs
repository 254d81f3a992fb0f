//! Report model: summary figures and chart descriptions derived from the
//! averaged run.

pub mod charts;

pub use charts::{ChartSpec, build_charts};

use crate::error::AnalysisError;
use crate::metrics::AveragedRow;
use serde::Serialize;

/// Headline figures of an averaged run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_iterations: f64,
    pub total_time: f64,
    pub time_per_iteration: f64,
    pub ending_value: f64,
    pub value_decrease: f64,
    pub decrease_per_iteration: f64,
    pub decrease_per_second: f64,
}

/// Build the summary from averaged rows and their cumulative time.
///
/// Fails with [`AnalysisError::DegenerateInput`] when there are no rows, when
/// the two inputs disagree in length, or when the last iteration or total time
/// is zero.
pub fn summarize(rows: &[AveragedRow], cumulative: &[f64]) -> Result<Summary, AnalysisError> {
    let (first, last) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(AnalysisError::DegenerateInput(
                "no averaged rows to summarize".to_string(),
            ));
        }
    };
    if cumulative.len() != rows.len() {
        return Err(AnalysisError::DegenerateInput(format!(
            "cumulative time has {} entries for {} rows",
            cumulative.len(),
            rows.len()
        )));
    }

    let total_iterations = last.iteration;
    let total_time = cumulative.last().copied().unwrap_or_default();
    if total_iterations == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "total iteration count is zero".to_string(),
        ));
    }
    if total_time == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "total elapsed time is zero".to_string(),
        ));
    }

    let value_decrease = first.mean_value - last.mean_value;
    Ok(Summary {
        total_iterations,
        total_time,
        time_per_iteration: total_time / total_iterations,
        ending_value: last.mean_value,
        value_decrease,
        decrease_per_iteration: value_decrease / total_iterations,
        decrease_per_second: value_decrease / total_time,
    })
}
