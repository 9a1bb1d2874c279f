//! Latency chart rendering.
//!
//! Draws the normalized series as a line chart. The x-axis spans the app's
//! viewport and is labeled with `M:SS.mmm` ticks; the y-axis fits the
//! latencies visible in that window.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
    Frame,
};

use crate::app::App;
use crate::data::ticks::{latency_labels, time_labels};
use crate::data::Point;

/// Legend entry for the latency dataset.
pub const SERIES_NAME: &str = "Latency";
pub const X_AXIS_TITLE: &str = "Time (mm:ss.ms)";
pub const Y_AXIS_TITLE: &str = "Latency (ms)";

/// Headroom added above and below the latency range, as a fraction of it.
const Y_PADDING: f64 = 0.05;

/// Render the latency chart into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (x_lo, x_hi) = app.viewport.window();
    let [y_lo, y_hi] = latency_bounds(app.loaded.series.points(), x_lo, x_hi);
    let tick_count = app.settings.tick_count;

    let data = app.loaded.series.xy();
    let datasets = vec![Dataset::default()
        .name(SERIES_NAME)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(app.theme.series))
        .data(&data)];

    let x_axis = Axis::default()
        .title(Span::styled(X_AXIS_TITLE, app.theme.header))
        .style(Style::default().fg(app.theme.border))
        .bounds([x_lo, x_hi])
        .labels(
            time_labels(x_lo, x_hi, tick_count)
                .into_iter()
                .map(|label| Span::styled(label, app.theme.label)),
        );

    let y_axis = Axis::default()
        .title(Span::styled(Y_AXIS_TITLE, app.theme.header))
        .style(Style::default().fg(app.theme.border))
        .bounds([y_lo, y_hi])
        .labels(
            latency_labels(y_lo, y_hi, tick_count)
                .into_iter()
                .map(|label| Span::styled(label, app.theme.label)),
        );

    let block = Block::default()
        .title(Span::styled(format!(" {} ", app.settings.title), app.theme.header))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

    frame.render_widget(chart, area);
}

/// Y bounds fitting the latencies whose time falls in `[x_lo, x_hi]`.
///
/// Falls back to the whole series when no point is visible, and widens a
/// flat range so the line does not sit on the border.
pub fn latency_bounds(points: &[Point], x_lo: f64, x_hi: f64) -> [f64; 2] {
    let visible = points
        .iter()
        .filter(|p| p.elapsed_secs >= x_lo && p.elapsed_secs <= x_hi);
    let (mut lo, mut hi) = fold_range(visible.map(|p| p.latency));
    if lo > hi {
        (lo, hi) = fold_range(points.iter().map(|p| p.latency));
    }
    if lo > hi {
        return [0.0, 1.0];
    }

    let span = hi - lo;
    if span == 0.0 {
        return [lo - 1.0, hi + 1.0];
    }
    [lo - span * Y_PADDING, hi + span * Y_PADDING]
}

fn fold_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(values: &[(f64, f64)]) -> Vec<Point> {
        values
            .iter()
            .map(|&(elapsed_secs, latency)| Point {
                elapsed_secs,
                latency,
            })
            .collect()
    }

    #[test]
    fn test_bounds_fit_visible_points() {
        let pts = points(&[(0.0, 10.0), (1.0, 30.0), (2.0, 110.0)]);
        let [lo, hi] = latency_bounds(&pts, 0.0, 1.0);
        assert_eq!(lo, 9.0);
        assert_eq!(hi, 31.0);
    }

    #[test]
    fn test_bounds_flat_series() {
        let pts = points(&[(0.0, 5.0), (1.0, 5.0)]);
        assert_eq!(latency_bounds(&pts, 0.0, 1.0), [4.0, 6.0]);
    }

    #[test]
    fn test_bounds_fall_back_to_all_points() {
        let pts = points(&[(0.0, 10.0), (10.0, 20.0)]);
        let [lo, hi] = latency_bounds(&pts, 4.0, 6.0);
        assert!(lo < 10.0 && hi > 20.0);
    }

    #[test]
    fn test_bounds_no_points() {
        assert_eq!(latency_bounds(&[], 0.0, 1.0), [0.0, 1.0]);
    }
}
