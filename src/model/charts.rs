use crate::config::{AxisRange, ChartStyle};
use crate::metrics::AveragedRow;
use serde::Serialize;

/// Which y axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub color: String,
    pub axis: Axis,
    /// (iteration, y) pairs in row order.
    pub points: Vec<[f64; 2]>,
}

/// Everything the chart page needs to draw one chart.
///
/// `None` ranges mean "fit to data".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub series: Vec<Series>,
    pub x_range: Option<AxisRange>,
    pub y_range: Option<AxisRange>,
    pub y2_range: Option<AxisRange>,
    pub font_family: String,
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
}

const ITERATION_TIME_LABEL: &str = "iteration time / s";
const TOTAL_TIME_LABEL: &str = "total time / s";
const VALUE_LABEL: &str = "regularization value";

/// Build the eight charts of an averaged run: iteration time, cumulative time
/// and value, plus the dual-axis time/value view, each once fitted to the data
/// (`*_rel`) and once on the fixed zoom axes (`*_abs`).
pub fn build_charts(
    headline: &str,
    rows: &[AveragedRow],
    cumulative: &[f64],
    style: &ChartStyle,
) -> Vec<ChartSpec> {
    let iterations: Vec<f64> = rows.iter().map(|r| r.iteration).collect();
    let times: Vec<f64> = rows.iter().map(|r| r.mean_elapsed_time).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.mean_value).collect();

    let series = |label: &str, color: &str, axis: Axis, ys: &[f64]| Series {
        label: label.to_string(),
        color: color.to_string(),
        axis,
        points: iterations.iter().zip(ys).map(|(&x, &y)| [x, y]).collect(),
    };
    let time_series = series(ITERATION_TIME_LABEL, &style.time_color, Axis::Primary, &times);
    let total_series = series(TOTAL_TIME_LABEL, &style.time_color, Axis::Primary, cumulative);
    let value_series = series(VALUE_LABEL, &style.value_color, Axis::Primary, &values);
    let value_secondary = series(VALUE_LABEL, &style.value_color, Axis::Secondary, &values);

    let chart = |name: &str, series: Vec<Series>, zoom: Option<(AxisRange, Option<AxisRange>)>| {
        ChartSpec {
            name: name.to_string(),
            title: headline.to_string(),
            x_label: "Iteration".to_string(),
            series,
            x_range: zoom.map(|_| style.zoom_iterations),
            y_range: zoom.map(|(y, _)| y),
            y2_range: zoom.and_then(|(_, y2)| y2),
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            width: style.width,
            height: style.height,
        }
    };

    vec![
        chart("time_rel", vec![time_series.clone()], None),
        chart(
            "time_abs",
            vec![time_series.clone()],
            Some((style.zoom_iteration_time, None)),
        ),
        chart("time_acc_rel", vec![total_series.clone()], None),
        chart(
            "time_acc_abs",
            vec![total_series],
            Some((style.zoom_total_time, None)),
        ),
        chart("value_rel", vec![value_series.clone()], None),
        chart(
            "value_abs",
            vec![value_series],
            Some((style.zoom_value, None)),
        ),
        chart(
            "both_rel",
            vec![time_series.clone(), value_secondary.clone()],
            None,
        ),
        chart(
            "both_abs",
            vec![time_series, value_secondary],
            Some((style.zoom_iteration_time, Some(style.zoom_value))),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows() -> Vec<AveragedRow> {
        vec![
            AveragedRow {
                iteration: 1.0,
                mean_elapsed_time: 2.0,
                mean_value: 30.0,
            },
            AveragedRow {
                iteration: 2.0,
                mean_elapsed_time: 4.0,
                mean_value: 10.0,
            },
        ]
    }

    #[test]
    fn builds_every_chart_with_headline() {
        let charts = build_charts("cfg A", &rows(), &[2.0, 6.0], &ChartStyle::default());
        let names: Vec<&str> = charts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "time_rel",
                "time_abs",
                "time_acc_rel",
                "time_acc_abs",
                "value_rel",
                "value_abs",
                "both_rel",
                "both_abs"
            ]
        );
        assert!(charts.iter().all(|c| c.title == "cfg A"));
    }

    #[test]
    fn hands_over_iterations_times_and_values() {
        let charts = build_charts("h", &rows(), &[2.0, 6.0], &ChartStyle::default());
        let by_name = |n: &str| charts.iter().find(|c| c.name == n).unwrap();

        assert_eq!(by_name("time_rel").series[0].points, vec![[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(by_name("time_acc_rel").series[0].points, vec![[1.0, 2.0], [2.0, 6.0]]);
        assert_eq!(by_name("value_rel").series[0].points, vec![[1.0, 30.0], [2.0, 10.0]]);

        let both = by_name("both_rel");
        assert_eq!(both.series.len(), 2);
        assert_eq!(both.series[0].axis, Axis::Primary);
        assert_eq!(both.series[1].axis, Axis::Secondary);
        assert_eq!(both.series[1].points, vec![[1.0, 30.0], [2.0, 10.0]]);
    }

    #[test]
    fn zoomed_charts_use_fixed_axes() {
        let style = ChartStyle::default();
        let charts = build_charts("h", &rows(), &[2.0, 6.0], &style);
        let by_name = |n: &str| charts.iter().find(|c| c.name == n).unwrap();

        let rel = by_name("value_rel");
        assert_eq!((rel.x_range, rel.y_range, rel.y2_range), (None, None, None));

        let abs = by_name("time_acc_abs");
        assert_eq!(abs.x_range, Some(style.zoom_iterations));
        assert_eq!(abs.y_range, Some(style.zoom_total_time));

        let both = by_name("both_abs");
        assert_eq!(both.y_range, Some(style.zoom_iteration_time));
        assert_eq!(both.y2_range, Some(style.zoom_value));
    }
}
