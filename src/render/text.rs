use crate::model::Summary;
use std::fmt::Write;

/// Render the plain-text averaging report.
///
/// `∅` marks a figure averaged over all runs found.
pub fn render_summary(headline: &str, summary: &Summary) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Average for config: {}", headline);
    let _ = writeln!(out, "∅ Total iterations: {}", summary.total_iterations);
    let _ = writeln!(out, "∅ Total time: {}s", summary.total_time);
    let _ = writeln!(out, "∅ time per iteration: {}s", summary.time_per_iteration);
    let _ = writeln!(out, "∅ ending R-value: {}", summary.ending_value);
    let _ = writeln!(out, "∅ total r-value decrease: {}", summary.value_decrease);
    let _ = writeln!(out, "∅ r-decrease per iteration: {}", summary.decrease_per_iteration);
    let _ = writeln!(out, "∅ r-decrease per second: {}", summary.decrease_per_second);
    out
}
