//! Physical units and unit-tagged arrays.
//!
//! A [`Unit`] is a scale factor to SI together with a [`Dimension`]. Two
//! units convert into each other only when their dimensions match.

mod dimension;
mod parser;
mod quantity;

pub use dimension::Dimension;
pub use quantity::Quantity;

use crate::error::{Result, SpecplotError};
use std::fmt;
use std::str::FromStr;

/// Relative tolerance used when comparing scale factors.
const SCALE_EPSILON: f64 = 1e-12;

/// A parsed physical unit.
#[derive(Debug, Clone)]
pub struct Unit {
    name: String,
    scale: f64,
    dimension: Dimension,
}

impl Unit {
    /// Parse a unit expression such as `erg/s/cm^2/Angstrom`.
    pub fn parse(input: &str) -> Result<Self> {
        let (scale, dimension) = parser::parse_expression(input)?;
        Ok(Self {
            name: input.trim().to_string(),
            scale,
            dimension,
        })
    }

    /// The unit of pure numbers.
    pub fn dimensionless() -> Self {
        Self {
            name: String::new(),
            scale: 1.0,
            dimension: Dimension::DIMENSIONLESS,
        }
    }

    /// Text the unit was written as.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Multiplier taking a value in this unit to SI.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Physical dimension.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Whether values in `self` can be expressed in `other`.
    pub fn is_convertible_to(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Factor `f` such that `value_in_self * f == value_in_other`.
    pub fn conversion_factor(&self, other: &Unit) -> Result<f64> {
        if !self.is_convertible_to(other) {
            return Err(SpecplotError::unit_conversion(
                self.display_name(),
                other.display_name(),
            ));
        }
        Ok(self.scale / other.scale)
    }

    /// Same dimension and same scale, whatever the spelling.
    pub fn is_equivalent(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
            && ((self.scale - other.scale) / other.scale).abs() < SCALE_EPSILON
    }

    fn display_name(&self) -> String {
        if self.name.is_empty() {
            "dimensionless".to_string()
        } else {
            self.name.clone()
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.is_equivalent(other)
    }
}

impl FromStr for Unit {
    type Err = SpecplotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
