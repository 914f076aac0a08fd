//! Pens: the line styles applied to series and error bars.

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha, 255 is opaque.
    pub a: u8,
}

impl Rgba {
    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Line style handed to plot graphics.
///
/// A pen without a color draws nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    /// Stroke color, `None` for an invisible pen.
    pub color: Option<Rgba>,
    /// Stroke width in device units.
    pub width: f32,
}

impl Pen {
    /// A solid pen of width 1.
    pub const fn new(color: Rgba) -> Self {
        Self {
            color: Some(color),
            width: 1.0,
        }
    }

    /// The pen that draws nothing.
    pub const fn none() -> Self {
        Self {
            color: None,
            width: 1.0,
        }
    }

    /// Same pen with another width.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Whether anything is drawn with this pen.
    pub fn is_visible(&self) -> bool {
        self.color.map_or(false, |c| c.a > 0)
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(Rgba::new(0, 0, 0, 255))
    }
}

/// The named slots of a [`PenStash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenRole {
    /// Series shown.
    On,
    /// Series hidden but drawn faintly.
    Inactive,
    /// Series hidden.
    Off,
    /// Error bars shown.
    ErrorOn,
    /// Error bars hidden.
    ErrorOff,
}

impl PenRole {
    /// Whether this role styles the error-bar graphic.
    pub fn is_error(self) -> bool {
        matches!(self, PenRole::ErrorOn | PenRole::ErrorOff)
    }

    /// Stash key name.
    pub fn name(self) -> &'static str {
        match self {
            PenRole::On => "pen_on",
            PenRole::Inactive => "pen_inactive",
            PenRole::Off => "pen_off",
            PenRole::ErrorOn => "error_pen_on",
            PenRole::ErrorOff => "error_pen_off",
        }
    }
}

/// Preset pens for every visibility outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PenStash {
    pen_on: Pen,
    pen_inactive: Pen,
    pen_off: Pen,
    error_pen_on: Pen,
    error_pen_off: Pen,
}

impl PenStash {
    /// Defaults, with optional replacements for the "on" pens.
    pub fn new(pen: Option<Pen>, error_pen: Option<Pen>) -> Self {
        Self {
            pen_on: pen.unwrap_or_default(),
            pen_inactive: Pen::new(Rgba::new(0, 0, 0, 127)),
            pen_off: Pen::none(),
            error_pen_on: error_pen.unwrap_or(Pen::new(Rgba::new(0, 0, 0, 50))),
            error_pen_off: Pen::none(),
        }
    }

    /// Pen stored for a role.
    pub fn get(&self, role: PenRole) -> Pen {
        match role {
            PenRole::On => self.pen_on,
            PenRole::Inactive => self.pen_inactive,
            PenRole::Off => self.pen_off,
            PenRole::ErrorOn => self.error_pen_on,
            PenRole::ErrorOff => self.error_pen_off,
        }
    }

    /// Replace the pen stored for a role.
    pub fn set(&mut self, role: PenRole, pen: Pen) {
        let slot = match role {
            PenRole::On => &mut self.pen_on,
            PenRole::Inactive => &mut self.pen_inactive,
            PenRole::Off => &mut self.pen_off,
            PenRole::ErrorOn => &mut self.error_pen_on,
            PenRole::ErrorOff => &mut self.error_pen_off,
        };
        *slot = pen;
    }
}

impl Default for PenStash {
    fn default() -> Self {
        Self::new(None, None)
    }
}
