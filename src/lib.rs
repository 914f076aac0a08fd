//! specplot - unit-aware spectrum plotting.
//!
//! specplot binds a spectral data layer (dispersion, flux and uncertainty
//! arrays with physical units) to drawable plot graphics, handling unit
//! conversion, visibility and pen styling. A terminal viewer built on
//! ratatui ships as the `specplot` binary.
//!
//! # Features
//!
//! - Unit expressions such as `erg/s/cm^2/Angstrom` with dimensional checks
//! - NetCDF and plain text spectrum readers
//! - Series and error-bar visibility with inactive styling
//! - Change notifications for units, visibility and pens
//!
//! # Example
//!
//! ```ignore
//! use specplot::data::{ReadOptions, SpectrumReader};
//! use specplot::plot::PlotContainer;
//! use std::path::Path;
//! use std::rc::Rc;
//!
//! let layer = SpectrumReader::read_file(Path::new("spectrum.nc"), &ReadOptions::default())?;
//! let mut container = PlotContainer::builder(Rc::new(layer)).build()?;
//! container.change_units_str(Some("nm"), Some("erg/s/cm^2/nm"), None)?;
//! println!("{}", container.data()?.value);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod data;
pub mod error;
pub mod plot;
pub mod ui;
pub mod units;
pub mod util;

pub use error::{Result, SpecplotError};
