use ndarray::{array, ArrayView1};
use specplot::data::{Layer, SpectrumLayer};
use specplot::plot::{
    ErrorBarOpts, ErrorGraphic, Pen, PenRole, PlotContainer, PlotGraphic, PlotStyle, Rgba,
    VisibilityState,
};
use specplot::units::{Quantity, Unit};
use specplot::SpecplotError;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct FakePlot {
    x: Vec<f64>,
    y: Vec<f64>,
    data_calls: usize,
    pens: Vec<Pen>,
}

impl PlotGraphic for FakePlot {
    fn set_data(&mut self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) {
        self.x = x.to_vec();
        self.y = y.to_vec();
        self.data_calls += 1;
    }

    fn set_pen(&mut self, pen: &Pen) {
        self.pens.push(*pen);
    }
}

#[derive(Default)]
struct FakeErrors {
    height: Vec<f64>,
    pens: Vec<Pen>,
}

impl ErrorGraphic for FakeErrors {
    fn set_data(&mut self, _x: ArrayView1<'_, f64>, _y: ArrayView1<'_, f64>, height: ArrayView1<'_, f64>) {
        self.height = height.to_vec();
    }

    fn set_opts(&mut self, opts: ErrorBarOpts) {
        if let Some(pen) = opts.pen {
            self.pens.push(pen);
        }
    }
}

fn unit(s: &str) -> Unit {
    Unit::parse(s).unwrap()
}

fn spectrum() -> Rc<dyn Layer> {
    Rc::new(
        SpectrumLayer::new(
            "spectrum",
            Quantity::from_vec(vec![400.0, 450.0, 500.0], unit("nm")),
            Quantity::from_vec(vec![1.0, 2.0, 4.0], unit("erg/s/cm^2/Angstrom")),
            Some(array![0.1, 0.2, 0.4]),
        )
        .unwrap(),
    )
}

fn setup() -> (PlotContainer, Rc<RefCell<FakePlot>>, Rc<RefCell<FakeErrors>>) {
    let plot = Rc::new(RefCell::new(FakePlot::default()));
    let errors = Rc::new(RefCell::new(FakeErrors::default()));
    let container = PlotContainer::builder(spectrum())
        .plot(plot.clone())
        .error(errors.clone())
        .build()
        .unwrap();
    (container, plot, errors)
}

#[test]
fn test_change_units_matches_manual_conversion() {
    let (mut container, plot, _) = setup();
    let pairs = [
        ("Angstrom", "erg/s/cm^2/nm"),
        ("um", "W/m^2/nm"),
        ("m", "W/m^3"),
        ("nm", "erg/s/cm^2/Angstrom"),
    ];

    for (x, y) in pairs {
        container.change_units(Some(unit(x)), Some(unit(y)), None).unwrap();

        let layer = container.layer().clone();
        let fx = layer.dispersion().unit.conversion_factor(&unit(x)).unwrap();
        let fy = layer.data().unit.conversion_factor(&unit(y)).unwrap();

        let dispersion = container.dispersion().unwrap();
        let data = container.data().unwrap();
        for i in 0..3 {
            let ex = layer.dispersion().value[i] * fx;
            let ey = layer.data().value[i] * fy;
            assert!((dispersion.value[i] - ex).abs() <= 1e-9 * ex.abs());
            assert!((data.value[i] - ey).abs() <= 1e-9 * ey.abs());
            assert!((plot.borrow().x[i] - ex).abs() <= 1e-9 * ex.abs());
        }
    }
}

#[test]
fn test_change_units_with_nothing_keeps_units() {
    let (mut container, _, _) = setup();
    container.change_units_str(Some("Angstrom"), Some("erg/s/cm^2/nm"), None).unwrap();
    let before = container.display_units().clone();

    container.change_units(None, None, None).unwrap();

    assert_eq!(container.display_units().x, before.x);
    assert_eq!(container.display_units().y, before.y);
}

#[test]
fn test_z_unit_is_stored_only() {
    let (mut container, plot, _) = setup();
    container.change_units(None, None, Some(unit("s"))).unwrap();
    assert_eq!(container.display_units().z, Some(unit("s")));
    assert_eq!(plot.borrow().y, vec![1.0, 2.0, 4.0]);
}

#[test]
fn test_per_angstrom_to_per_nm_scenario() {
    let (mut container, _, errors) = setup();
    container.change_units_str(None, Some("erg/s/cm^2/nm"), None).unwrap();

    let units = container.display_units();
    assert_eq!(units.x, unit("nm"));
    assert_eq!(units.y, unit("erg/s/cm^2/nm"));
    assert!(units.z.is_none());

    let data = container.data().unwrap();
    assert!((data.value[2] - 40.0).abs() < 1e-9);
    assert!((errors.borrow().height[2] - 4.0).abs() < 1e-9);
}

#[test]
fn test_incompatible_units_fail() {
    let (mut container, _, _) = setup();
    let err = container.change_units(None, Some(unit("Jy")), None).unwrap_err();
    assert!(err.is_unit_conversion());
    assert_eq!(container.display_units().y, unit("erg/s/cm^2/Angstrom"));
}

#[test]
fn test_out_of_range_unit_strings_are_rejected() {
    let (mut container, plot, _) = setup();
    let calls = plot.borrow().data_calls;

    for x in ["m^256", "m^100 m^100", "0 nm"] {
        let err = container.change_units_str(Some(x), None, None).unwrap_err();
        assert!(matches!(err, SpecplotError::UnitParse { .. }), "{}", x);
    }

    assert_eq!(container.display_units().x, unit("nm"));
    assert_eq!(plot.borrow().data_calls, calls);
}

#[test]
fn test_error_visibility_follows_stored_series_flag() {
    let (mut container, _, errors) = setup();

    // Non-override calls keep the stored series flag.
    container.set_visibility(true, true, true, true);
    container.set_visibility(false, true, true, false);
    assert!(container.applied_visibility().series_visible);
    assert!(container.applied_visibility().error_visible);

    // Once the series is stored as hidden, error bars are forced off.
    container.set_visibility(false, true, true, true);
    assert!(!container.applied_visibility().error_visible);
    container.set_visibility(true, true, true, false);
    assert!(!container.applied_visibility().error_visible);
    assert_eq!(
        *errors.borrow().pens.last().unwrap(),
        container.pen_stash().get(PenRole::ErrorOff)
    );

    // The requested flags are what gets persisted.
    assert_eq!(container.visibility(), VisibilityState::new(false, true, true));
}

#[test]
fn test_hidden_series_pen_choice() {
    let (mut container, plot, _) = setup();

    container.set_visibility(false, false, false, true);
    assert_eq!(*plot.borrow().pens.last().unwrap(), container.pen_stash().get(PenRole::Off));

    container.set_visibility(false, false, true, true);
    assert_eq!(
        *plot.borrow().pens.last().unwrap(),
        container.pen_stash().get(PenRole::Inactive)
    );

    container.set_visibility(true, false, true, true);
    assert_eq!(*plot.borrow().pens.last().unwrap(), container.pen());
}

#[test]
fn test_set_pen_updates_cache_and_graphic_once() {
    let (mut container, plot, _) = setup();
    let green = Pen::new(Rgba::new(0, 200, 0, 255)).with_width(2.0);
    let calls_before = plot.borrow().pens.len();

    container.set_pen(green);

    assert_eq!(container.pen(), green);
    assert_eq!(container.pen_stash().get(PenRole::On), green);
    assert_eq!(plot.borrow().pens.len(), calls_before + 1);
    assert_eq!(plot.borrow().pens[calls_before], green);
}

#[test]
fn test_set_error_pen_without_error_graphic() {
    let plot = Rc::new(RefCell::new(FakePlot::default()));
    let mut container = PlotContainer::builder(spectrum()).plot(plot.clone()).build().unwrap();
    let pen = Pen::new(Rgba::new(10, 20, 30, 40));

    container.set_error_pen(pen);

    assert_eq!(container.error_pen(), pen);
    assert!(plot.borrow().pens.is_empty());
    assert!(!container.apply_pen(PenRole::ErrorOn));
}

#[test]
fn test_update_pushes_converted_arrays() {
    let (mut container, plot, errors) = setup();
    container.change_units_str(Some("Angstrom"), None, None).unwrap();
    let calls = plot.borrow().data_calls;

    container.update(true).unwrap();

    assert_eq!(plot.borrow().data_calls, calls + 1);
    for (got, want) in plot.borrow().x.iter().zip([4000.0, 4500.0, 5000.0]) {
        assert!((got - want).abs() < 1e-9);
    }
    assert_eq!(errors.borrow().height, vec![0.1, 0.2, 0.4]);
}

#[test]
fn test_update_without_plot_is_noop() {
    let mut container =
        PlotContainer::new(spectrum(), None, true, PlotStyle::Scatter, None, None).unwrap();
    container.update(false).unwrap();
    assert_eq!(container.style(), PlotStyle::Scatter);
    assert!(container.plot().is_none());
}

#[test]
fn test_replacing_plot_does_not_redraw() {
    let (mut container, _, _) = setup();
    let replacement = Rc::new(RefCell::new(FakePlot::default()));

    container.set_plot(Some(replacement.clone()));
    assert_eq!(replacement.borrow().data_calls, 0);

    container.update(false).unwrap();
    assert_eq!(replacement.borrow().data_calls, 1);
}

#[test]
fn test_hooks_fire_after_commit() {
    let (mut container, _, _) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let log = seen.clone();
    container
        .on_unit_change
        .subscribe(move |units| log.borrow_mut().push(format!("units {}", units.y)));
    let log = seen.clone();
    container
        .on_visibility_change
        .subscribe(move |v| log.borrow_mut().push(format!("visible {}", v.series_visible)));
    let log = seen.clone();
    container
        .on_pen_change
        .subscribe(move |change| log.borrow_mut().push(format!("pen {}", change.role.name())));

    container.change_units_str(None, Some("erg/s/cm^2/nm"), None).unwrap();
    container.set_visibility(false, false, true, true);
    container.set_error_pen(Pen::none());

    assert_eq!(
        *seen.borrow(),
        vec![
            "units erg/s/cm^2/nm".to_string(),
            "visible false".to_string(),
            "pen error_pen_on".to_string(),
        ]
    );
}

#[test]
fn test_missing_uncertainty_reads_as_zero() {
    let layer: Rc<dyn Layer> = Rc::new(
        SpectrumLayer::new(
            "bare",
            Quantity::from_vec(vec![1.0, 2.0], unit("um")),
            Quantity::from_vec(vec![3.0, 4.0], unit("Jy")),
            None,
        )
        .unwrap(),
    );
    let container = PlotContainer::builder(layer).build().unwrap();
    assert_eq!(container.uncertainty().unwrap().value.to_vec(), vec![0.0, 0.0]);
}
