//! Arrays tagged with a unit.

use super::Unit;
use crate::error::Result;
use ndarray::{Array1, ArrayView1};

/// A 1D array of values expressed in a single unit.
#[derive(Debug, Clone)]
pub struct Quantity {
    /// Raw values.
    pub value: Array1<f64>,
    /// Unit of every element.
    pub unit: Unit,
}

impl Quantity {
    /// Tag an array with a unit.
    pub fn new(value: Array1<f64>, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Build from a plain vector.
    pub fn from_vec(values: Vec<f64>, unit: Unit) -> Self {
        Self::new(Array1::from(values), unit)
    }

    /// Express these values in `target`.
    pub fn to(&self, target: &Unit) -> Result<Quantity> {
        let factor = self.unit.conversion_factor(target)?;
        Ok(Quantity {
            value: self.value.mapv(|v| v * factor),
            unit: target.clone(),
        })
    }

    /// Borrow the values.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.value.view()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// True when there are no elements.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Minimum and maximum over finite values.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in self.value.iter() {
            if v.is_finite() {
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
            }
        }
        if min <= max {
            Some((min, max))
        } else {
            None
        }
    }
}
