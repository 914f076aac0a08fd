//! Layout and unit-cycling configuration for the spectrum viewer.

use crate::units::Unit;

/// Configuration for the spectrum chart.
#[derive(Debug, Clone)]
pub struct PlotLayoutConfig {
    /// Padding factor for Y-axis (0.1 = 10% margin).
    pub y_axis_padding_factor: f64,
    /// Number of tick labels per axis.
    pub label_count: usize,
    /// Points kept per series before decimation.
    pub max_points: usize,
}

impl Default for PlotLayoutConfig {
    fn default() -> Self {
        Self {
            y_axis_padding_factor: 0.1,
            label_count: 3,
            max_points: 4000,
        }
    }
}

/// Units offered when cycling axes interactively.
#[derive(Debug, Clone)]
pub struct UnitCycleConfig {
    /// Dispersion units, cycled with `w`.
    pub dispersion: Vec<String>,
    /// Flux units, cycled with `u`.
    pub flux: Vec<String>,
}

impl Default for UnitCycleConfig {
    fn default() -> Self {
        Self {
            dispersion: ["Angstrom", "nm", "um"].map(String::from).to_vec(),
            flux: [
                "erg/s/cm^2/Angstrom",
                "erg/s/cm^2/nm",
                "W/m^2/nm",
                "W/m^2/um",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl UnitCycleConfig {
    /// Unit after `current` in `choices`, matched by equivalence and
    /// wrapping; the first entry if `current` is not listed.
    ///
    /// Entries that fail to parse are skipped with a warning.
    pub fn next_unit(choices: &[String], current: &Unit) -> Option<Unit> {
        let parsed: Vec<Unit> = choices
            .iter()
            .filter_map(|c| match Unit::parse(c) {
                Ok(u) => Some(u),
                Err(e) => {
                    tracing::warn!("Ignoring configured unit: {}", e);
                    None
                }
            })
            .collect();

        if parsed.is_empty() {
            return None;
        }

        let next = match parsed.iter().position(|u| u == current) {
            Some(i) => (i + 1) % parsed.len(),
            None => 0,
        };
        parsed.into_iter().nth(next)
    }
}

/// Combined viewer configuration.
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Chart layout.
    pub plot: PlotLayoutConfig,
    /// Interactive unit choices.
    pub units: UnitCycleConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(s: &str) -> Unit {
        Unit::parse(s).unwrap()
    }

    #[test]
    fn test_next_unit_wraps() {
        let units = UnitCycleConfig::default().dispersion;
        assert_eq!(UnitCycleConfig::next_unit(&units, &unit("Angstrom")), Some(unit("nm")));
        assert_eq!(UnitCycleConfig::next_unit(&units, &unit("um")), Some(unit("Angstrom")));
        assert_eq!(UnitCycleConfig::next_unit(&units, &unit("pc")), Some(unit("Angstrom")));
        assert_eq!(UnitCycleConfig::next_unit(&[], &unit("nm")), None);
    }

    #[test]
    fn test_next_unit_matches_other_spellings() {
        let units = UnitCycleConfig::default().dispersion;
        // `AA` and `0.1 nm` are both the first entry.
        assert_eq!(UnitCycleConfig::next_unit(&units, &unit("AA")), Some(unit("nm")));
        assert_eq!(UnitCycleConfig::next_unit(&units, &unit("0.1 nm")), Some(unit("nm")));
        assert_eq!(UnitCycleConfig::next_unit(&units, &unit("micron")), Some(unit("Angstrom")));
    }

    #[test]
    fn test_next_unit_skips_bad_entries() {
        let units = vec!["furlong".to_string(), "nm".to_string()];
        assert_eq!(UnitCycleConfig::next_unit(&units, &unit("pc")), Some(unit("nm")));
    }
}
