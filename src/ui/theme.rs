//! Color themes for the UI.

use crate::app::Theme;
use crate::plot::{Pen, Rgba};
use ratatui::style::{Color, Modifier, Style};

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Background color.
    pub bg: Color,
    /// Primary text color.
    pub text: Color,
    /// Heading text color.
    pub heading: Color,
    /// Border color.
    pub border: Color,
    /// Status bar foreground color.
    pub status_fg: Color,
    /// Status bar background color.
    pub status_bg: Color,
    /// Error color.
    pub error: Color,
    /// Visible series.
    pub series: Rgba,
    /// Hidden series drawn faintly.
    pub inactive: Rgba,
    /// Error bars.
    pub errors: Rgba,
}

impl ThemeColors {
    /// Create color palette from theme.
    pub fn from_theme(theme: &Theme) -> Self {
        match theme {
            Theme::GruvboxDark => Self {
                bg: Color::Rgb(40, 40, 40),
                text: Color::Rgb(235, 219, 178),
                heading: Color::Rgb(251, 184, 108),
                border: Color::Rgb(102, 92, 84),
                status_fg: Color::Rgb(235, 219, 178),
                status_bg: Color::Rgb(60, 56, 54),
                error: Color::Rgb(251, 73, 52),
                series: Rgba::new(131, 165, 152, 255),
                inactive: Rgba::new(146, 131, 116, 127),
                errors: Rgba::new(211, 134, 155, 100),
            },
            Theme::GruvboxLight => Self {
                bg: Color::Rgb(251, 245, 234),
                text: Color::Rgb(60, 56, 54),
                heading: Color::Rgb(175, 58, 3),
                border: Color::Rgb(213, 196, 161),
                status_fg: Color::Rgb(60, 56, 54),
                status_bg: Color::Rgb(235, 219, 178),
                error: Color::Rgb(157, 0, 6),
                series: Rgba::new(7, 102, 120, 255),
                inactive: Rgba::new(146, 131, 116, 127),
                errors: Rgba::new(143, 63, 113, 100),
            },
        }
    }

    /// Pen for a visible series.
    pub fn series_pen(&self) -> Pen {
        Pen::new(self.series)
    }

    /// Pen for a hidden series shown as inactive.
    pub fn inactive_pen(&self) -> Pen {
        Pen::new(self.inactive)
    }

    /// Pen for visible error bars.
    pub fn error_pen(&self) -> Pen {
        Pen::new(self.errors)
    }
}

/// Terminal style for a pen; `None` when the pen draws nothing.
///
/// Terminals have no alpha, so translucent pens are dimmed instead.
pub fn pen_style(pen: &Pen) -> Option<Style> {
    if !pen.is_visible() {
        return None;
    }
    let c = pen.color?;
    let style = Style::default().fg(Color::Rgb(c.r, c.g, c.b));
    Some(if c.a < 128 {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    })
}
