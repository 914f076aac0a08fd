//! Utility types.
//!
//! This module provides viewer configuration shared by the UI and the
//! binary.

mod layout_config;

pub use layout_config::{LayoutConfig, PlotLayoutConfig, UnitCycleConfig};
