//! Binding of one spectral layer to one plot graphic.

use super::events::EventHook;
use super::graphic::{ErrorBarOpts, ErrorGraphic, PlotGraphic, PlotStyle, SharedError, SharedPlot};
use super::pen::{Pen, PenRole, PenStash};
use super::visibility::{resolve_visibility, VisibilityState};
use crate::data::Layer;
use crate::error::Result;
use crate::units::{Quantity, Unit};
use ndarray::Array1;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

/// Units a container currently renders in.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayUnits {
    /// Dispersion axis unit.
    pub x: Unit,
    /// Flux axis unit.
    pub y: Unit,
    /// Reserved third axis; stored, never used for conversion.
    pub z: Option<Unit>,
}

/// Payload of [`PlotContainer::on_pen_change`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenChange {
    /// Slot that changed.
    pub role: PenRole,
    /// New pen in that slot.
    pub pen: Pen,
}

/// First present of: explicit request, previous display unit, layer unit.
fn resolve_axis(explicit: Option<Unit>, previous: Option<&Unit>, native: &Unit) -> Unit {
    explicit
        .or_else(|| previous.cloned())
        .unwrap_or_else(|| native.clone())
}

/// Adapter drawing a [`Layer`] through a series graphic and an optional
/// error-bar graphic.
///
/// The container never mutates the layer. Unit changes, visibility toggles
/// and pen edits are pushed to the graphics immediately and then announced
/// on the matching [`EventHook`].
pub struct PlotContainer {
    layer: Rc<dyn Layer>,
    plot: Option<SharedPlot>,
    error: Option<SharedError>,
    display_units: DisplayUnits,
    style: PlotStyle,
    pen_stash: PenStash,
    visibility: VisibilityState,
    applied: VisibilityState,

    /// Fired after display units change.
    pub on_unit_change: EventHook<DisplayUnits>,
    /// Fired after visibility is applied, with the resolved flags.
    pub on_visibility_change: EventHook<VisibilityState>,
    /// Fired after a stashed pen is replaced.
    pub on_pen_change: EventHook<PenChange>,
}

impl PlotContainer {
    /// Bind `layer` to an optional series graphic.
    ///
    /// Display units start at the layer's preferred units. With a graphic
    /// attached the data is drawn immediately.
    pub fn new(
        layer: Rc<dyn Layer>,
        plot: Option<SharedPlot>,
        visible: bool,
        style: PlotStyle,
        pen: Option<Pen>,
        error_pen: Option<Pen>,
    ) -> Result<Self> {
        let (x, y) = layer.units();
        let (native_x, native_y) = layer.layer_units();
        let display_units = DisplayUnits {
            x: resolve_axis(Some(x), None, &native_x),
            y: resolve_axis(Some(y), None, &native_y),
            z: None,
        };
        layer.dispersion().unit.conversion_factor(&display_units.x)?;
        layer.data().unit.conversion_factor(&display_units.y)?;

        let mut container = Self {
            layer,
            plot,
            error: None,
            display_units,
            style,
            pen_stash: PenStash::new(pen, error_pen),
            visibility: VisibilityState::default(),
            applied: VisibilityState::default(),
            on_unit_change: EventHook::new(),
            on_visibility_change: EventHook::new(),
            on_pen_change: EventHook::new(),
        };

        debug!(
            "Plot container for '{}' in ({}, {})",
            container.layer.name(),
            container.display_units.x,
            container.display_units.y
        );

        if container.plot.is_some() {
            container.update(false)?;
        }
        if !visible {
            container.set_visibility(false, false, true, true);
        }

        Ok(container)
    }

    /// Start a builder for `layer`.
    pub fn builder(layer: Rc<dyn Layer>) -> PlotContainerBuilder {
        PlotContainerBuilder::new(layer)
    }

    /// The bound layer.
    pub fn layer(&self) -> &Rc<dyn Layer> {
        &self.layer
    }

    /// The series graphic, if any.
    pub fn plot(&self) -> Option<&SharedPlot> {
        self.plot.as_ref()
    }

    /// Replace the series graphic. Nothing is redrawn.
    pub fn set_plot(&mut self, plot: Option<SharedPlot>) {
        self.plot = plot;
    }

    /// The error-bar graphic, if any.
    pub fn error(&self) -> Option<&SharedError> {
        self.error.as_ref()
    }

    /// Attach or detach the error-bar graphic.
    ///
    /// A newly attached graphic receives the current data and the pen
    /// matching the applied visibility.
    pub fn set_error(&mut self, error: Option<SharedError>) -> Result<()> {
        self.error = error;

        if let Some(ref error) = self.error {
            let x = self.dispersion()?;
            let y = self.data()?;
            let height = self.uncertainty()?;
            let pen = self.pen_stash.get(self.applied.error_role());

            let mut graphic = error.borrow_mut();
            graphic.set_data(x.values(), y.values(), height.values());
            graphic.set_opts(ErrorBarOpts::pen(pen));
        }

        Ok(())
    }

    /// Display mode tag.
    pub fn style(&self) -> PlotStyle {
        self.style
    }

    /// Change the display mode tag.
    pub fn set_style(&mut self, style: PlotStyle) {
        self.style = style;
    }

    /// Units currently rendered.
    pub fn display_units(&self) -> &DisplayUnits {
        &self.display_units
    }

    /// Change the display units and redraw.
    ///
    /// Each axis resolves to the first present of the argument, the current
    /// display unit and the layer's storage unit. `z` is stored as given.
    /// On a dimension mismatch the previous units are kept.
    pub fn change_units(&mut self, x: Option<Unit>, y: Option<Unit>, z: Option<Unit>) -> Result<()> {
        let (native_x, native_y) = self.layer.layer_units();
        let x = resolve_axis(x, Some(&self.display_units.x), &native_x);
        let y = resolve_axis(y, Some(&self.display_units.y), &native_y);

        self.layer.dispersion().unit.conversion_factor(&x)?;
        self.layer.data().unit.conversion_factor(&y)?;

        debug!("Display units for '{}' -> ({}, {})", self.layer.name(), x, y);
        self.display_units = DisplayUnits { x, y, z };
        self.on_unit_change.emit(&self.display_units);

        self.update(false)
    }

    /// [`PlotContainer::change_units`] taking unit expressions.
    pub fn change_units_str(
        &mut self,
        x: Option<&str>,
        y: Option<&str>,
        z: Option<&str>,
    ) -> Result<()> {
        let x = x.map(Unit::parse).transpose()?;
        let y = y.map(Unit::parse).transpose()?;
        let z = z.map(Unit::parse).transpose()?;
        self.change_units(x, y, z)
    }

    /// Persisted visibility flags.
    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    /// Flags last pushed to the graphics.
    pub fn applied_visibility(&self) -> VisibilityState {
        self.applied
    }

    /// Choose and apply pens for the series and error bars.
    ///
    /// Without `override_state`, `series_show` and `inactive` are ignored in
    /// favour of the stored flags, so error bars can be toggled without
    /// touching the series. Error bars are always hidden with the series.
    pub fn set_visibility(
        &mut self,
        series_show: bool,
        error_show: bool,
        inactive: bool,
        override_state: bool,
    ) {
        let requested = VisibilityState::new(series_show, error_show, inactive);
        let resolved = resolve_visibility(self.visibility, requested, override_state);

        if override_state {
            self.visibility = requested;
        }
        self.applied = resolved;

        trace!("Visibility for '{}': {:?}", self.layer.name(), resolved);

        self.apply_pen(resolved.series_role());
        self.apply_pen(resolved.error_role());
        self.on_visibility_change.emit(&resolved);
    }

    /// Push a stashed pen to its graphic without changing the stash.
    ///
    /// Returns whether a graphic received it.
    pub fn apply_pen(&self, role: PenRole) -> bool {
        let pen = self.pen_stash.get(role);

        if role.is_error() {
            if let Some(ref error) = self.error {
                error.borrow_mut().set_opts(ErrorBarOpts::pen(pen));
                return true;
            }
        } else if let Some(ref plot) = self.plot {
            plot.borrow_mut().set_pen(&pen);
            return true;
        }

        false
    }

    /// All preset pens.
    pub fn pen_stash(&self) -> &PenStash {
        &self.pen_stash
    }

    /// Series pen used when visible.
    pub fn pen(&self) -> Pen {
        self.pen_stash.get(PenRole::On)
    }

    /// Replace the visible series pen and apply it.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen_stash.set(PenRole::On, pen);
        self.apply_pen(PenRole::On);
        self.on_pen_change.emit(&PenChange {
            role: PenRole::On,
            pen,
        });
    }

    /// Error-bar pen used when visible.
    pub fn error_pen(&self) -> Pen {
        self.pen_stash.get(PenRole::ErrorOn)
    }

    /// Replace the visible error pen, applying it if error bars are attached.
    pub fn set_error_pen(&mut self, pen: Pen) {
        self.pen_stash.set(PenRole::ErrorOn, pen);
        self.apply_pen(PenRole::ErrorOn);
        self.on_pen_change.emit(&PenChange {
            role: PenRole::ErrorOn,
            pen,
        });
    }

    /// Replace any preset. The graphic is refreshed if that preset is in use.
    pub fn set_stashed_pen(&mut self, role: PenRole, pen: Pen) {
        self.pen_stash.set(role, pen);
        if role == self.applied.series_role() || role == self.applied.error_role() {
            self.apply_pen(role);
        }
        self.on_pen_change.emit(&PenChange { role, pen });
    }

    /// Flux in the display unit.
    pub fn data(&self) -> Result<Quantity> {
        self.layer.data().to(&self.display_units.y)
    }

    /// Dispersion in the display unit.
    pub fn dispersion(&self) -> Result<Quantity> {
        self.layer.dispersion().to(&self.display_units.x)
    }

    /// Uncertainty in the flux display unit; zeros if the layer has none.
    pub fn uncertainty(&self) -> Result<Quantity> {
        let stored = self.layer.data();
        let values = self
            .layer
            .uncertainty()
            .cloned()
            .unwrap_or_else(|| Array1::zeros(stored.len()));
        Quantity::new(values, stored.unit.clone()).to(&self.display_units.y)
    }

    /// Push converted arrays to the attached graphics.
    ///
    /// `autoscale` is recorded only; view ranges belong to the renderer.
    pub fn update(&mut self, autoscale: bool) -> Result<()> {
        let Some(ref plot) = self.plot else {
            trace!("No plot attached to '{}', skipping update", self.layer.name());
            return Ok(());
        };

        let x = self.dispersion()?;
        let y = self.data()?;
        plot.borrow_mut().set_data(x.values(), y.values());

        if let Some(ref error) = self.error {
            let height = self.uncertainty()?;
            error
                .borrow_mut()
                .set_data(x.values(), y.values(), height.values());
        }

        if autoscale {
            debug!("Autoscale requested for '{}'", self.layer.name());
        }

        Ok(())
    }
}

impl fmt::Debug for PlotContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotContainer")
            .field("layer", &self.layer.name())
            .field("has_plot", &self.plot.is_some())
            .field("has_error", &self.error.is_some())
            .field("display_units", &self.display_units)
            .field("style", &self.style)
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Builder for [`PlotContainer`].
pub struct PlotContainerBuilder {
    layer: Rc<dyn Layer>,
    plot: Option<SharedPlot>,
    error: Option<SharedError>,
    visible: bool,
    style: PlotStyle,
    pen: Option<Pen>,
    error_pen: Option<Pen>,
}

impl PlotContainerBuilder {
    fn new(layer: Rc<dyn Layer>) -> Self {
        Self {
            layer,
            plot: None,
            error: None,
            visible: true,
            style: PlotStyle::default(),
            pen: None,
            error_pen: None,
        }
    }

    /// Series graphic.
    pub fn plot(mut self, plot: SharedPlot) -> Self {
        self.plot = Some(plot);
        self
    }

    /// Error-bar graphic.
    pub fn error(mut self, error: SharedError) -> Self {
        self.error = Some(error);
        self
    }

    /// Initial series visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Display mode tag.
    pub fn style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    /// Visible series pen.
    pub fn pen(mut self, pen: Pen) -> Self {
        self.pen = Some(pen);
        self
    }

    /// Visible error pen.
    pub fn error_pen(mut self, pen: Pen) -> Self {
        self.error_pen = Some(pen);
        self
    }

    /// Build the container and attach the error graphic, if any.
    pub fn build(self) -> Result<PlotContainer> {
        let mut container = PlotContainer::new(
            self.layer,
            self.plot,
            self.visible,
            self.style,
            self.pen,
            self.error_pen,
        )?;
        if self.error.is_some() {
            container.set_error(self.error)?;
        }
        Ok(container)
    }
}

impl fmt::Debug for PlotContainerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotContainerBuilder")
            .field("layer", &self.layer.name())
            .field("visible", &self.visible)
            .field("style", &self.style)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SpectrumLayer;
    use crate::plot::Rgba;
    use ndarray::{array, ArrayView1};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingPlot {
        data: Vec<(Vec<f64>, Vec<f64>)>,
        pens: Vec<Pen>,
    }

    impl PlotGraphic for RecordingPlot {
        fn set_data(&mut self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) {
            self.data.push((x.to_vec(), y.to_vec()));
        }

        fn set_pen(&mut self, pen: &Pen) {
            self.pens.push(*pen);
        }
    }

    #[derive(Default)]
    struct RecordingErrors {
        heights: Vec<Vec<f64>>,
        opts: Vec<ErrorBarOpts>,
    }

    impl ErrorGraphic for RecordingErrors {
        fn set_data(
            &mut self,
            _x: ArrayView1<'_, f64>,
            _y: ArrayView1<'_, f64>,
            height: ArrayView1<'_, f64>,
        ) {
            self.heights.push(height.to_vec());
        }

        fn set_opts(&mut self, opts: ErrorBarOpts) {
            self.opts.push(opts);
        }
    }

    fn layer() -> Rc<dyn Layer> {
        Rc::new(
            SpectrumLayer::new(
                "test",
                Quantity::from_vec(vec![500.0, 510.0], Unit::parse("nm").unwrap()),
                Quantity::from_vec(vec![1.0, 2.0], Unit::parse("erg/s/cm^2/Angstrom").unwrap()),
                Some(array![0.1, 0.2]),
            )
            .unwrap(),
        )
    }

    fn attached() -> (PlotContainer, Rc<RefCell<RecordingPlot>>, Rc<RefCell<RecordingErrors>>) {
        let plot = Rc::new(RefCell::new(RecordingPlot::default()));
        let errors = Rc::new(RefCell::new(RecordingErrors::default()));
        let container = PlotContainer::builder(layer())
            .plot(plot.clone())
            .error(errors.clone())
            .build()
            .unwrap();
        (container, plot, errors)
    }

    #[test]
    fn test_construction_resolves_units_and_draws() {
        let (container, plot, errors) = attached();
        assert_eq!(container.display_units().x, Unit::parse("nm").unwrap());
        assert!(container.display_units().z.is_none());
        assert_eq!(plot.borrow().data.len(), 1);
        assert_eq!(errors.borrow().heights, vec![vec![0.1, 0.2]]);
    }

    #[test]
    fn test_construction_without_plot_still_resolves_units() {
        let container =
            PlotContainer::new(layer(), None, true, PlotStyle::Line, None, None).unwrap();
        assert_eq!(container.display_units().y, Unit::parse("erg/s/cm^2/AA").unwrap());
        assert!((container.data().unwrap().value[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_change_units_scales_flux() {
        let (mut container, plot, _) = attached();
        container.change_units_str(None, Some("erg/s/cm^2/nm"), None).unwrap();

        let units = container.display_units();
        assert_eq!(units.x, Unit::parse("nm").unwrap());
        assert_eq!(units.y, Unit::parse("erg/s/cm^2/nm").unwrap());
        assert!(units.z.is_none());

        let last = plot.borrow().data.last().cloned().unwrap();
        assert!((last.1[0] - 10.0).abs() < 1e-9);
        assert!((last.1[1] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_change_units_failure_keeps_previous() {
        let (mut container, plot, _) = attached();
        let err = container.change_units_str(Some("Hz"), None, None).unwrap_err();
        assert!(err.is_unit_conversion());
        assert_eq!(container.display_units().x, Unit::parse("nm").unwrap());
        assert_eq!(plot.borrow().data.len(), 1);
    }

    #[test]
    fn test_hidden_series_uses_inactive_or_off_pen() {
        let (mut container, plot, _) = attached();

        container.set_visibility(false, false, true, true);
        assert_eq!(*plot.borrow().pens.last().unwrap(), container.pen_stash().get(PenRole::Inactive));

        container.set_visibility(false, false, false, true);
        assert_eq!(*plot.borrow().pens.last().unwrap(), Pen::none());

        // The visible pen itself is untouched.
        assert_eq!(container.pen(), Pen::default());
    }

    #[test]
    fn test_error_pen_follows_resolved_visibility() {
        let (mut container, _, errors) = attached();
        container.set_visibility(false, true, true, true);
        assert!(!container.applied_visibility().error_visible);
        assert_eq!(
            errors.borrow().opts.last().unwrap().pen,
            Some(container.pen_stash().get(PenRole::ErrorOff))
        );
    }

    #[test]
    fn test_set_pen_applies_once() {
        let (mut container, plot, _) = attached();
        let before = plot.borrow().pens.len();
        let red = Pen::new(Rgba::new(255, 0, 0, 255));

        container.set_pen(red);

        assert_eq!(container.pen(), red);
        assert_eq!(plot.borrow().pens.len(), before + 1);
        assert_eq!(*plot.borrow().pens.last().unwrap(), red);
    }

    #[test]
    fn test_hidden_construction() {
        let plot = Rc::new(RefCell::new(RecordingPlot::default()));
        let container = PlotContainer::builder(layer())
            .plot(plot.clone())
            .visible(false)
            .build()
            .unwrap();
        assert!(!container.visibility().series_visible);
        assert_eq!(
            *plot.borrow().pens.last().unwrap(),
            container.pen_stash().get(PenRole::Inactive)
        );
    }
}
