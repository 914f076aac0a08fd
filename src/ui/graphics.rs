//! Terminal-side plot graphics fed by a [`PlotContainer`](crate::plot::PlotContainer).

use crate::plot::{ErrorBarOpts, ErrorGraphic, Pen, PlotGraphic};
use ndarray::ArrayView1;

/// Points and pen of a series, ready for a ratatui `Chart`.
#[derive(Debug, Clone, Default)]
pub struct TerminalSeries {
    points: Vec<(f64, f64)>,
    pen: Pen,
}

impl TerminalSeries {
    /// An empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Current pen.
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// `(x_min, x_max, y_min, y_max)` over finite points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        bounds_of(self.points.iter().copied())
    }
}

impl PlotGraphic for TerminalSeries {
    fn set_data(&mut self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) {
        self.points = x.iter().copied().zip(y.iter().copied()).collect();
    }

    fn set_pen(&mut self, pen: &Pen) {
        self.pen = *pen;
    }
}

/// Vertical error bars as `(x, low, high)`.
#[derive(Debug, Clone, Default)]
pub struct TerminalErrorBars {
    bars: Vec<(f64, f64, f64)>,
    pen: Pen,
}

impl TerminalErrorBars {
    /// No bars.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bars.
    pub fn bars(&self) -> &[(f64, f64, f64)] {
        &self.bars
    }

    /// Current pen.
    pub fn pen(&self) -> Pen {
        self.pen
    }

    /// Points sampled along each bar, `samples` per bar, for scatter drawing.
    pub fn sample_points(&self, samples: usize) -> Vec<(f64, f64)> {
        let samples = samples.max(2);
        let mut points = Vec::with_capacity(self.bars.len() * samples);
        for &(x, lo, hi) in &self.bars {
            for i in 0..samples {
                let t = i as f64 / (samples - 1) as f64;
                points.push((x, lo + (hi - lo) * t));
            }
        }
        points
    }

    /// `(x_min, x_max, y_min, y_max)` over bar ends.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        bounds_of(
            self.bars
                .iter()
                .flat_map(|&(x, lo, hi)| [(x, lo), (x, hi)]),
        )
    }
}

impl ErrorGraphic for TerminalErrorBars {
    fn set_data(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        height: ArrayView1<'_, f64>,
    ) {
        self.bars = x
            .iter()
            .zip(y.iter())
            .zip(height.iter())
            .map(|((&x, &y), &h)| (x, y - h / 2.0, y + h / 2.0))
            .collect();
    }

    fn set_opts(&mut self, opts: ErrorBarOpts) {
        if let Some(pen) = opts.pen {
            self.pen = pen;
        }
    }
}

fn bounds_of(points: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64, f64, f64)> {
    let mut acc: Option<(f64, f64, f64, f64)> = None;
    for (x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        acc = Some(match acc {
            None => (x, x, y, y),
            Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
        });
    }
    acc
}
