use crate::error::AnalysisError;
use crate::metrics::row::{MetricRow, RunLog};
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Leading lines dropped from every log: the column header and the
/// iteration-zero baseline row the logger emits before any work is done.
pub const HEADER_SKIP: usize = 2;

/// Trailing lines dropped from every log: the final iteration may be a
/// partial batch and is not comparable across runs.
pub const TAIL_SKIP: usize = 1;

/// Load one run's metrics CSV and trim it to the comparable rows.
///
/// Expected columns (comma-separated):
/// iteration,elapsed_time,value
///
/// Example:
/// 120,0.8312,20311
///
/// A missing file yields [`AnalysisError::MissingRun`] so the caller can lower
/// its run count; any malformed row is fatal.
pub fn load_run(path: &Path) -> Result<RunLog, AnalysisError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalysisError::MissingRun {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::io(path, e),
    })?;
    parse_run(&text, path)
}

/// Parse the text of a metrics log. `path` is only used for diagnostics.
pub fn parse_run(text: &str, path: &Path) -> Result<RunLog, AnalysisError> {
    let re = Regex::new(r#"^\s*([^,\s]+)\s*,\s*([^,\s]+)\s*,\s*([^,\s]+)\s*$"#)?;

    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= HEADER_SKIP + TAIL_SKIP {
        return Ok(RunLog::new());
    }

    let body = &lines[HEADER_SKIP..lines.len() - TAIL_SKIP];
    let mut out = RunLog::with_capacity(body.len());
    for (offset, line) in body.iter().enumerate() {
        let lno = HEADER_SKIP + offset + 1;
        let parse_error = |reason: String| AnalysisError::Parse {
            path: path.to_path_buf(),
            line: lno,
            reason,
        };

        let caps = re
            .captures(line)
            .ok_or_else(|| parse_error(format!("expected 3 columns, got {:?}", line)))?;

        let mut fields = [0.0f64; 3];
        for (slot, field) in fields.iter_mut().zip(1..=3) {
            let raw = caps.get(field).map(|m| m.as_str()).unwrap_or_default();
            *slot = raw
                .parse::<f64>()
                .map_err(|e| parse_error(format!("column {}: {:?}: {}", field, raw, e)))?;
            if !slot.is_finite() {
                return Err(parse_error(format!("column {} is not finite: {:?}", field, raw)));
            }
        }
        let [iteration, elapsed_time, value] = fields;

        if iteration < 0.0 || iteration.fract() != 0.0 {
            return Err(parse_error(format!(
                "iteration must be a non-negative integer, got {}",
                iteration
            )));
        }
        if elapsed_time < 0.0 {
            return Err(parse_error(format!(
                "elapsed time must be non-negative, got {}",
                elapsed_time
            )));
        }

        out.push(MetricRow {
            iteration: iteration as u64,
            elapsed_time,
            value,
        });
    }

    Ok(out)
}
