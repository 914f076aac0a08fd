//! Physical dimensions as integer exponents of SI base quantities.

use std::fmt;

/// Exponents of length, mass, time, electric current and temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimension {
    /// Length exponent.
    pub length: i8,
    /// Mass exponent.
    pub mass: i8,
    /// Time exponent.
    pub time: i8,
    /// Electric current exponent.
    pub current: i8,
    /// Temperature exponent.
    pub temperature: i8,
}

impl Dimension {
    /// No dimension at all (pure numbers).
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0, 0, 0);
    /// Length.
    pub const LENGTH: Self = Self::new(1, 0, 0, 0, 0);
    /// Mass.
    pub const MASS: Self = Self::new(0, 1, 0, 0, 0);
    /// Time.
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0);
    /// Electric current.
    pub const CURRENT: Self = Self::new(0, 0, 0, 1, 0);
    /// Temperature.
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 0, 1);
    /// Frequency (1/s).
    pub const FREQUENCY: Self = Self::new(0, 0, -1, 0, 0);
    /// Energy (kg m^2 s^-2).
    pub const ENERGY: Self = Self::new(2, 1, -2, 0, 0);
    /// Power (kg m^2 s^-3).
    pub const POWER: Self = Self::new(2, 1, -3, 0, 0);
    /// Spectral flux density per unit frequency (kg s^-2).
    pub const SPECTRAL_FLUX_DENSITY: Self = Self::new(0, 1, -2, 0, 0);

    /// Build a dimension from its exponents.
    pub const fn new(length: i8, mass: i8, time: i8, current: i8, temperature: i8) -> Self {
        Self {
            length,
            mass,
            time,
            current,
            temperature,
        }
    }

    /// Raise every exponent to an integer power.
    ///
    /// Returns `None` if an exponent leaves the `i8` range.
    pub fn checked_powi(self, exp: i32) -> Option<Self> {
        let e = i8::try_from(exp).ok()?;
        Some(Self::new(
            self.length.checked_mul(e)?,
            self.mass.checked_mul(e)?,
            self.time.checked_mul(e)?,
            self.current.checked_mul(e)?,
            self.temperature.checked_mul(e)?,
        ))
    }

    /// Product of two dimensions, `None` on exponent overflow.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.length.checked_add(rhs.length)?,
            self.mass.checked_add(rhs.mass)?,
            self.time.checked_add(rhs.time)?,
            self.current.checked_add(rhs.current)?,
            self.temperature.checked_add(rhs.temperature)?,
        ))
    }

    /// Quotient of two dimensions, `None` on exponent overflow.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.checked_mul(rhs.checked_powi(-1)?)
    }

    /// True for pure numbers.
    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }

        let parts = [
            ("L", self.length),
            ("M", self.mass),
            ("T", self.time),
            ("I", self.current),
            ("Θ", self.temperature),
        ];

        let text: Vec<String> = parts
            .iter()
            .filter(|(_, exp)| *exp != 0)
            .map(|(sym, exp)| {
                if *exp == 1 {
                    sym.to_string()
                } else {
                    format!("{}^{}", sym, exp)
                }
            })
            .collect();

        write!(f, "{}", text.join(" "))
    }
}
