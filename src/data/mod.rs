//! Data reading and representation.
//!
//! This module handles spectral layers and reading them from NetCDF or
//! plain text files.

mod layer;
mod reader;

pub use layer::{Layer, SpectrumLayer};
pub use reader::{parse_ascii, ReadOptions, SpectrumReader};
