use crate::stats::TimeSeriesPoint;

/// X (seconds) and Y (wpm) upper bounds for the results chart.
///
/// Falls back to the configured duration when there are no samples, and
/// never reports a span shorter than one second.
pub fn compute_chart_params(points: &[TimeSeriesPoint], duration: Option<f64>) -> (f64, f64) {
    let highest_wpm = points.iter().map(|p| p.wpm).fold(0.0, f64::max);
    let span = points
        .last()
        .map(|p| p.t)
        .or(duration)
        .unwrap_or(1.0)
        .max(1.0);

    (span, highest_wpm.ceil())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
