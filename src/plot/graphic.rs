//! Interfaces to the drawable objects a container feeds.

use super::pen::Pen;
use ndarray::ArrayView1;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// A drawable line/series.
pub trait PlotGraphic {
    /// Replace the plotted points.
    fn set_data(&mut self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>);

    /// Replace the stroke style.
    fn set_pen(&mut self, pen: &Pen);
}

/// Options accepted by an error-bar graphic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ErrorBarOpts {
    /// Stroke style of the bars, left unchanged when `None`.
    pub pen: Option<Pen>,
}

impl ErrorBarOpts {
    /// Options that only change the pen.
    pub fn pen(pen: Pen) -> Self {
        Self { pen: Some(pen) }
    }
}

/// A drawable set of vertical error bars.
pub trait ErrorGraphic {
    /// Replace bar positions; each bar spans `height` centred on `y`.
    fn set_data(
        &mut self,
        x: ArrayView1<'_, f64>,
        y: ArrayView1<'_, f64>,
        height: ArrayView1<'_, f64>,
    );

    /// Update display options.
    fn set_opts(&mut self, opts: ErrorBarOpts);
}

/// Shared handle to a series graphic.
pub type SharedPlot = Rc<RefCell<dyn PlotGraphic>>;

/// Shared handle to an error-bar graphic.
pub type SharedError = Rc<RefCell<dyn ErrorGraphic>>;

/// How a series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotStyle {
    /// Connected line.
    #[default]
    Line,
    /// Histogram-like steps.
    Step,
    /// Unconnected points.
    Scatter,
}

impl PlotStyle {
    /// Next style in cycle.
    pub fn next(self) -> Self {
        match self {
            PlotStyle::Line => PlotStyle::Step,
            PlotStyle::Step => PlotStyle::Scatter,
            PlotStyle::Scatter => PlotStyle::Line,
        }
    }

    /// Tag name.
    pub fn name(self) -> &'static str {
        match self {
            PlotStyle::Line => "line",
            PlotStyle::Step => "step",
            PlotStyle::Scatter => "scatter",
        }
    }
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(PlotStyle::Line),
            "step" | "steps" | "histogram" => Ok(PlotStyle::Step),
            "scatter" | "points" => Ok(PlotStyle::Scatter),
            other => Err(format!("unknown plot style '{}'", other)),
        }
    }
}
