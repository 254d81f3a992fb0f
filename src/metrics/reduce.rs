use crate::error::AnalysisError;
use crate::metrics::parse::load_run;
use crate::metrics::row::{AveragedRow, RunLog};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How many runs an experiment directory is expected to hold.
pub const DEFAULT_RUN_COUNT: usize = 10;

/// The runs found under a base directory.
#[derive(Debug, Clone)]
pub struct RunSet {
    pub runs: Vec<RunLog>,
    /// 1-based indices of runs whose log was absent.
    pub missing: Vec<usize>,
}

impl RunSet {
    /// The averaging denominator: runs actually found, not runs requested.
    pub fn effective_count(&self) -> usize {
        self.runs.len()
    }
}

/// Conventional location of run `index`'s log: `run-<index>/metrics/metrics.csv`.
pub fn run_log_path(base: &Path, index: usize) -> PathBuf {
    base.join(format!("run-{}", index))
        .join("metrics")
        .join("metrics.csv")
}

/// Load runs `1..=requested` from `base`, skipping (and counting) absent ones.
pub fn locate_runs(base: &Path, requested: usize) -> Result<RunSet, AnalysisError> {
    let mut runs = Vec::with_capacity(requested);
    let mut missing = Vec::new();

    for index in 1..=requested {
        match load_run(&run_log_path(base, index)) {
            Ok(log) => runs.push(log),
            Err(AnalysisError::MissingRun { path }) => {
                warn!(run = index, path = %path.display(), "could not find metrics file");
                missing.push(index);
            }
            Err(e) => return Err(e),
        }
    }

    if runs.is_empty() {
        return Err(AnalysisError::NoRuns {
            requested,
            base: base.to_path_buf(),
        });
    }

    info!(
        found = runs.len(),
        missing = missing.len(),
        "Found metrics of {} runs. Starting averaging.",
        runs.len()
    );
    Ok(RunSet { runs, missing })
}

/// Elementwise mean of every column over all runs, row by row.
///
/// All runs must have the same, non-zero number of rows.
pub fn average(runs: &[RunLog]) -> Result<Vec<AveragedRow>, AnalysisError> {
    let first = runs
        .first()
        .ok_or_else(|| AnalysisError::DegenerateInput("no run logs to average".to_string()))?;
    let expected = first.len();
    if expected == 0 {
        return Err(AnalysisError::DegenerateInput(
            "run logs contain no rows after trimming".to_string(),
        ));
    }

    for (index, run) in runs.iter().enumerate() {
        if run.len() != expected {
            return Err(AnalysisError::ShapeMismatch {
                index,
                expected,
                actual: run.len(),
            });
        }
    }

    let n = runs.len() as f64;
    let averaged = (0..expected)
        .map(|i| {
            let (mut iteration, mut time, mut value) = (0.0f64, 0.0f64, 0.0f64);
            for run in runs {
                let row = &run[i];
                iteration += row.iteration as f64;
                time += row.elapsed_time;
                value += row.value;
            }
            AveragedRow {
                iteration: iteration / n,
                mean_elapsed_time: time / n,
                mean_value: value / n,
            }
        })
        .collect();

    Ok(averaged)
}

/// Running sum of the mean per-iteration time.
pub fn accumulate_time(rows: &[AveragedRow]) -> Vec<f64> {
    rows.iter()
        .scan(0.0f64, |acc, row| {
            *acc += row.mean_elapsed_time;
            Some(*acc)
        })
        .collect()
}
