//! Shared formatting utilities for UI components.

/// Format an axis tick label compactly.
pub(crate) fn format_axis_label(val: f64) -> String {
    if !val.is_finite() {
        return "?".to_string();
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.0}", val)
    } else if abs_val >= 1.0 {
        format!("{:.1}", val)
    } else {
        format!("{:.2}", val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_axis_label() {
        assert_eq!(format_axis_label(0.0), "0");
        assert_eq!(format_axis_label(5000.4), "5000");
        assert_eq!(format_axis_label(12.34), "12.3");
        assert_eq!(format_axis_label(0.5), "0.50");
        assert_eq!(format_axis_label(1.5e-17), "1.5e-17");
        assert_eq!(format_axis_label(f64::NAN), "?");
    }
}
