//! Plot containers and their styling.
//!
//! A [`PlotContainer`] binds one [`Layer`](crate::data::Layer) to a series
//! graphic and an optional error-bar graphic. The graphics are anything
//! implementing [`PlotGraphic`] and [`ErrorGraphic`]; the terminal viewer
//! provides ratatui-backed ones in [`crate::ui`].

mod container;
mod events;
mod graphic;
mod pen;
mod visibility;

pub use container::{DisplayUnits, PenChange, PlotContainer, PlotContainerBuilder};
pub use events::{EventHook, HandlerId};
pub use graphic::{ErrorBarOpts, ErrorGraphic, PlotGraphic, PlotStyle, SharedError, SharedPlot};
pub use pen::{Pen, PenRole, PenStash, Rgba};
pub use visibility::{error_visible_for, resolve_visibility, VisibilityState};
