//! Chart cosmetics handed to the chart pages.
//!
//! Every field is optional in a style file; anything left out keeps the
//! built-in value.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Closed axis interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub font_family: String,
    pub font_size: u32,
    pub time_color: String,
    pub value_color: String,
    pub width: u32,
    pub height: u32,

    /// Fixed limits used by the zoomed (`*_abs`) charts.
    pub zoom_iterations: AxisRange,
    pub zoom_iteration_time: AxisRange,
    pub zoom_total_time: AxisRange,
    pub zoom_value: AxisRange,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: "DejaVu Sans".to_string(),
            font_size: 15,
            time_color: "#bccf02".to_string(),
            value_color: "#03305d".to_string(),
            width: 1280,
            height: 960,
            zoom_iterations: AxisRange::new(-100.0, 10100.0),
            zoom_iteration_time: AxisRange::new(0.0, 25.0),
            zoom_total_time: AxisRange::new(0.0, 1000.0),
            zoom_value: AxisRange::new(0.0, 25500.0),
        }
    }
}

impl ChartStyle {
    /// Read a JSON style file, filling unspecified fields from the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read chart style from {}", path.display()))?;
        let style = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse chart style from {}", path.display()))?;
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_style_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        fs::write(
            &path,
            r##"{ "time_color": "#ff0000", "zoom_value": { "min": 0, "max": 500 } }"##,
        )
        .unwrap();

        let style = ChartStyle::load(&path).unwrap();
        assert_eq!(style.time_color, "#ff0000");
        assert_eq!(style.zoom_value, AxisRange::new(0.0, 500.0));
        assert_eq!(style.value_color, ChartStyle::default().value_color);
        assert_eq!(style.zoom_iterations, AxisRange::new(-100.0, 10100.0));
    }

    #[test]
    fn unreadable_style_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ChartStyle::load(&dir.path().join("missing.json")).is_err());
    }
}
