//! Application state and logic.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::rc::Rc;

use crate::data::{Layer, SpectrumLayer};
use crate::error::Result;
use crate::plot::{PenRole, PlotContainer, PlotStyle};
use crate::ui::{TerminalErrorBars, TerminalSeries, ThemeColors};
use crate::units::Unit;
use crate::util::{LayoutConfig, UnitCycleConfig};

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Startup choices for the viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Initial dispersion unit.
    pub x_unit: Option<String>,
    /// Initial flux unit.
    pub y_unit: Option<String>,
    /// Initial display mode.
    pub style: PlotStyle,
    /// Start with error bars hidden.
    pub hide_errors: bool,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Source file.
    pub file_path: PathBuf,
    /// Container binding the layer to the terminal graphics.
    pub container: PlotContainer,
    /// Series graphic drawn by the chart.
    pub series: Rc<RefCell<TerminalSeries>>,
    /// Error-bar graphic drawn by the chart.
    pub errors: Rc<RefCell<TerminalErrorBars>>,
    /// Viewer configuration.
    pub config: LayoutConfig,
    /// Current theme.
    pub theme: Theme,
    /// Whether the user wants error bars (they still hide with the series).
    pub errors_wanted: bool,
    status: Rc<RefCell<String>>,
}

impl App {
    /// Bind `layer` to fresh terminal graphics.
    pub fn new(
        layer: SpectrumLayer,
        file_path: PathBuf,
        options: &ViewOptions,
        config: LayoutConfig,
    ) -> Result<Self> {
        let theme = Theme::GruvboxDark;
        let colors = ThemeColors::from_theme(&theme);
        let series = Rc::new(RefCell::new(TerminalSeries::new()));
        let errors = Rc::new(RefCell::new(TerminalErrorBars::new()));

        let mut container = PlotContainer::builder(Rc::new(layer))
            .plot(series.clone())
            .error(errors.clone())
            .style(options.style)
            .pen(colors.series_pen())
            .error_pen(colors.error_pen())
            .build()?;
        container.set_stashed_pen(PenRole::Inactive, colors.inactive_pen());
        container.change_units_str(options.x_unit.as_deref(), options.y_unit.as_deref(), None)?;

        let status = Rc::new(RefCell::new(format!("{} loaded", container.layer().name())));

        let sink = status.clone();
        container.on_unit_change.subscribe(move |units| {
            *sink.borrow_mut() = format!("Units: {} | {}", units.x, units.y);
        });
        let sink = status.clone();
        container.on_visibility_change.subscribe(move |v| {
            *sink.borrow_mut() = format!(
                "Series {} | errors {}",
                if v.series_visible {
                    "shown"
                } else if v.show_inactive {
                    "inactive"
                } else {
                    "hidden"
                },
                if v.error_visible { "shown" } else { "hidden" }
            );
        });

        let errors_wanted = !options.hide_errors;
        container.set_visibility(true, errors_wanted, true, true);

        tracing::info!("Viewing {}", file_path.display());

        Ok(Self {
            file_path,
            container,
            series,
            errors,
            config,
            theme,
            errors_wanted,
            status,
        })
    }

    /// Status line text.
    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    /// Replace the status line text.
    pub fn set_status(&self, text: impl Into<String>) {
        *self.status.borrow_mut() = text.into();
    }

    /// Show or hide the series, remembering the choice.
    pub fn toggle_series(&mut self) {
        let v = self.container.visibility();
        self.container
            .set_visibility(!v.series_visible, self.errors_wanted, v.show_inactive, true);
    }

    /// Show or hide error bars without touching the series state.
    pub fn toggle_errors(&mut self) {
        self.errors_wanted = !self.errors_wanted;
        self.container.set_visibility(false, self.errors_wanted, false, false);
        if self.errors_wanted && !self.container.applied_visibility().error_visible {
            self.set_status("Error bars stay hidden while the series is hidden");
        }
    }

    /// Switch hidden series between the faint and the empty pen.
    pub fn toggle_inactive(&mut self) {
        let v = self.container.visibility();
        self.container
            .set_visibility(v.series_visible, self.errors_wanted, !v.show_inactive, true);
    }

    /// Move to the next configured flux unit.
    pub fn cycle_flux_units(&mut self) {
        let current = self.container.display_units().y.clone();
        let next = UnitCycleConfig::next_unit(&self.config.units.flux, &current);
        self.apply_units(None, next);
    }

    /// Move to the next configured dispersion unit.
    pub fn cycle_dispersion_units(&mut self) {
        let current = self.container.display_units().x.clone();
        let next = UnitCycleConfig::next_unit(&self.config.units.dispersion, &current);
        self.apply_units(next, None);
    }

    fn apply_units(&mut self, x: Option<Unit>, y: Option<Unit>) {
        if x.is_none() && y.is_none() {
            self.set_status("No units configured");
            return;
        }
        if let Err(e) = self.container.change_units(x, y, None) {
            tracing::warn!("Unit change rejected: {}", e);
            self.set_status(e.to_string());
        }
    }

    /// Cycle the display mode.
    pub fn cycle_style(&mut self) {
        let style = self.container.style().next();
        self.container.set_style(style);
        self.set_status(format!("Style: {}", style));
    }

    /// Switch theme and restyle the graphics.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        let colors = ThemeColors::from_theme(&self.theme);

        self.container.set_pen(colors.series_pen());
        self.container.set_error_pen(colors.error_pen());
        self.container
            .set_stashed_pen(PenRole::Inactive, colors.inactive_pen());

        // set_pen pushes the visible pen unconditionally; restore the pens
        // matching the current flags.
        self.container.set_visibility(false, self.errors_wanted, false, false);
        self.set_status(format!("Theme: {}", self.theme.name()));
    }

    /// Redraw from the layer with an autoscale request.
    pub fn autoscale(&mut self) {
        match self.container.update(true) {
            Ok(()) => self.set_status("Rescaled"),
            Err(e) => self.set_status(e.to_string()),
        }
    }
}

/// Render a container's arrays as a text table in display units.
pub fn format_table(container: &PlotContainer) -> Result<String> {
    let x = container.dispersion()?;
    let y = container.data()?;
    let err = container.uncertainty()?;

    let mut out = String::new();
    let _ = writeln!(out, "# units: {} | {}", x.unit, y.unit);
    for ((xv, yv), ev) in x.value.iter().zip(y.value.iter()).zip(err.value.iter()) {
        let _ = writeln!(out, "{} {} {}", xv, yv, ev);
    }
    Ok(out)
}
