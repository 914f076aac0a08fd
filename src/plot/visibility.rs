//! Visibility flags and the rules that combine them.

use super::pen::PenRole;

/// The three independent visibility flags of a plotted layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityState {
    /// Series drawn with its normal pen.
    pub series_visible: bool,
    /// Error bars drawn.
    pub error_visible: bool,
    /// A hidden series is still drawn with the faint inactive pen.
    pub show_inactive: bool,
}

impl VisibilityState {
    /// Build a state from its flags.
    pub const fn new(series_visible: bool, error_visible: bool, show_inactive: bool) -> Self {
        Self {
            series_visible,
            error_visible,
            show_inactive,
        }
    }

    /// Pen slot for the series.
    pub fn series_role(&self) -> PenRole {
        if self.series_visible {
            PenRole::On
        } else if self.show_inactive {
            PenRole::Inactive
        } else {
            PenRole::Off
        }
    }

    /// Pen slot for the error bars.
    pub fn error_role(&self) -> PenRole {
        if self.error_visible {
            PenRole::ErrorOn
        } else {
            PenRole::ErrorOff
        }
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new(true, true, true)
    }
}

/// Error bars are never shown on a hidden series.
pub fn error_visible_for(series_visible: bool, requested: bool) -> bool {
    series_visible && requested
}

/// Combine the stored flags with a request.
///
/// Without `override_state` only the error flag comes from `requested`; the
/// series and inactive flags keep their stored values.
pub fn resolve_visibility(
    current: VisibilityState,
    requested: VisibilityState,
    override_state: bool,
) -> VisibilityState {
    let base = if override_state {
        requested
    } else {
        VisibilityState {
            error_visible: requested.error_visible,
            ..current
        }
    };

    VisibilityState {
        error_visible: error_visible_for(base.series_visible, base.error_visible),
        ..base
    }
}
