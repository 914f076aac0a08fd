//! Spectrum chart rendering.

use super::formatters::format_axis_label;
use super::theme::{pen_style, ThemeColors};
use crate::app::App;
use crate::data::Layer;
use crate::plot::PlotStyle;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples drawn along each error bar.
const ERROR_BAR_SAMPLES: usize = 5;

/// Expand points into a staircase holding each value until the next x.
pub fn step_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, _) = pair[1];
        out.push((x0, y0));
        out.push((x1, y0));
    }
    if let Some(&last) = points.last() {
        out.push(last);
    }
    out
}

/// Keep at most `max_points` evenly strided points, always keeping the last.
pub fn decimate(points: &[(f64, f64)], max_points: usize) -> Vec<(f64, f64)> {
    if max_points < 2 || points.len() <= max_points {
        return points.to_vec();
    }

    let step = points.len() as f64 / (max_points - 1) as f64;
    let mut out = Vec::with_capacity(max_points);
    let mut pos = 0.0;
    while (pos as usize) < points.len() - 1 && out.len() < max_points - 1 {
        out.push(points[pos as usize]);
        pos += step;
    }
    out.push(points[points.len() - 1]);
    out
}

/// Pad a `[min, max]` range; a degenerate range becomes `[v - 1, v + 1]`.
fn padded(min: f64, max: f64, factor: f64) -> [f64; 2] {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return [min - 1.0, max + 1.0];
    }
    [min - span * factor, max + span * factor]
}

fn labels(bounds: [f64; 2], count: usize) -> Vec<String> {
    let count = count.max(2);
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            format_axis_label(bounds[0] + (bounds[1] - bounds[0]) * t)
        })
        .collect()
}

/// Draw the spectrum chart.
pub(crate) fn draw_chart(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let series = app.series.borrow();
    let errors = app.errors.borrow();
    let layout = &app.config.plot;
    let container = &app.container;
    let units = container.display_units();

    let raw = decimate(series.points(), layout.max_points);
    let (graph_type, points) = match container.style() {
        PlotStyle::Line => (GraphType::Line, raw),
        PlotStyle::Step => (GraphType::Line, step_points(&raw)),
        PlotStyle::Scatter => (GraphType::Scatter, raw),
    };
    let bar_points = errors.sample_points(ERROR_BAR_SAMPLES);

    let mut datasets = Vec::new();
    if let Some(style) = pen_style(&errors.pen()) {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(style)
                .data(&bar_points),
        );
    }
    if let Some(style) = pen_style(&series.pen()) {
        datasets.push(
            Dataset::default()
                .name(container.layer().name().to_string())
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(style)
                .data(&points),
        );
    }

    let mut bounds = series.bounds();
    if errors.pen().is_visible() {
        if let Some((ex0, ex1, ey0, ey1)) = errors.bounds() {
            bounds = Some(match bounds {
                Some((x0, x1, y0, y1)) => (x0.min(ex0), x1.max(ex1), y0.min(ey0), y1.max(ey1)),
                None => (ex0, ex1, ey0, ey1),
            });
        }
    }
    let (x_min, x_max, y_min, y_max) = bounds.unwrap_or((0.0, 1.0, 0.0, 1.0));
    let x_bounds = if x_max > x_min { [x_min, x_max] } else { padded(x_min, x_max, 0.0) };
    let y_bounds = padded(y_min, y_max, layout.y_axis_padding_factor);

    let x_axis = Axis::default()
        .title(format!("[{}]", units.x))
        .style(Style::default().fg(colors.text))
        .bounds(x_bounds)
        .labels(labels(x_bounds, layout.label_count));

    let y_axis = Axis::default()
        .title(format!("[{}]", units.y))
        .style(Style::default().fg(colors.text))
        .bounds(y_bounds)
        .labels(labels(y_bounds, layout.label_count));

    let title = format!(
        " {} ({} pts, {}) ",
        container.layer().name(),
        series.points().len(),
        container.style()
    );

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.border))
                .title(title)
                .title_style(Style::default().fg(colors.heading)),
        )
        .style(Style::default().bg(colors.bg))
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_points() {
        let steps = step_points(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        assert_eq!(
            steps,
            vec![(0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 3.0)]
        );
        assert!(step_points(&[]).is_empty());
    }

    #[test]
    fn test_decimate_keeps_ends() {
        let points: Vec<(f64, f64)> = (0..100).map(|i| (i as f64, 0.0)).collect();
        let out = decimate(&points, 10);
        assert!(out.len() <= 10);
        assert_eq!(out.first(), Some(&(0.0, 0.0)));
        assert_eq!(out.last(), Some(&(99.0, 0.0)));
        assert_eq!(decimate(&points[..5], 10).len(), 5);
    }

    #[test]
    fn test_padded_degenerate_range() {
        assert_eq!(padded(2.0, 2.0, 0.1), [1.0, 3.0]);
        assert_eq!(padded(0.0, 10.0, 0.1), [-1.0, 11.0]);
    }
}
