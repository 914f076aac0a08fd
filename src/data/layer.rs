//! Spectral data layers.

use crate::error::{Result, SpecplotError};
use crate::units::{Quantity, Unit};
use ndarray::Array1;

/// A source of unit-tagged spectral arrays.
///
/// Implementors own the data; plot containers only ever read it.
pub trait Layer {
    /// Display name of the layer.
    fn name(&self) -> &str;

    /// Spectral axis (wavelength, frequency, energy).
    fn dispersion(&self) -> &Quantity;

    /// Flux values, one per dispersion element.
    fn data(&self) -> &Quantity;

    /// Per-element uncertainty, expressed in the unit of [`Layer::data`].
    fn uncertainty(&self) -> Option<&Array1<f64>>;

    /// Preferred `(x, y)` units for display.
    fn units(&self) -> (Unit, Unit) {
        self.layer_units()
    }

    /// Units the arrays are stored in.
    fn layer_units(&self) -> (Unit, Unit) {
        (self.dispersion().unit.clone(), self.data().unit.clone())
    }
}

/// In-memory spectrum: dispersion, flux and optional uncertainty.
#[derive(Debug, Clone)]
pub struct SpectrumLayer {
    name: String,
    dispersion: Quantity,
    data: Quantity,
    uncertainty: Option<Array1<f64>>,
    preferred_units: Option<(Unit, Unit)>,
}

impl SpectrumLayer {
    /// Create a layer, checking that every array has the same length.
    pub fn new(
        name: impl Into<String>,
        dispersion: Quantity,
        data: Quantity,
        uncertainty: Option<Array1<f64>>,
    ) -> Result<Self> {
        if data.len() != dispersion.len() {
            return Err(SpecplotError::shape_mismatch("flux", dispersion.len(), data.len()));
        }
        if let Some(ref unc) = uncertainty {
            if unc.len() != dispersion.len() {
                return Err(SpecplotError::shape_mismatch(
                    "uncertainty",
                    dispersion.len(),
                    unc.len(),
                ));
            }
        }

        Ok(Self {
            name: name.into(),
            dispersion,
            data,
            uncertainty,
            preferred_units: None,
        })
    }

    /// Override the preferred display units.
    pub fn with_units(mut self, x: Unit, y: Unit) -> Result<Self> {
        self.dispersion.unit.conversion_factor(&x)?;
        self.data.unit.conversion_factor(&y)?;
        self.preferred_units = Some((x, y));
        Ok(self)
    }

    /// Number of spectral elements.
    pub fn len(&self) -> usize {
        self.dispersion.len()
    }

    /// True when the layer has no samples.
    pub fn is_empty(&self) -> bool {
        self.dispersion.is_empty()
    }

    /// Finite min/max of the dispersion axis in stored units.
    pub fn dispersion_range(&self) -> Option<(f64, f64)> {
        self.dispersion.finite_range()
    }

    /// Finite min/max of the flux in stored units.
    pub fn flux_range(&self) -> Option<(f64, f64)> {
        self.data.finite_range()
    }
}

impl Layer for SpectrumLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn dispersion(&self) -> &Quantity {
        &self.dispersion
    }

    fn data(&self) -> &Quantity {
        &self.data
    }

    fn uncertainty(&self) -> Option<&Array1<f64>> {
        self.uncertainty.as_ref()
    }

    fn units(&self) -> (Unit, Unit) {
        self.preferred_units
            .clone()
            .unwrap_or_else(|| self.layer_units())
    }
}
