//! Error types for specplot.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for specplot operations.
pub type Result<T> = std::result::Result<T, SpecplotError>;

/// Errors that can occur in specplot.
#[derive(Debug, Error)]
pub enum SpecplotError {
    /// A value cannot be expressed in the requested unit.
    #[error("Cannot convert from '{from}' to '{to}': incompatible dimensions")]
    UnitConversion { from: String, to: String },

    /// A unit expression could not be parsed.
    #[error("Invalid unit '{input}': {reason}")]
    UnitParse { input: String, reason: String },

    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unsupported file format.
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Failed to read NetCDF file.
    #[error("NetCDF error: {0}")]
    NetCDF(String),

    /// A required variable is absent from the file.
    #[error("Variable not found: {name}")]
    MissingVariable { name: String },

    /// Arrays that must line up have different lengths.
    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Malformed line in a text spectrum.
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl SpecplotError {
    /// Create a UnitConversion error.
    pub fn unit_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::UnitConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a UnitParse error.
    pub fn unit_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnitParse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create an UnsupportedFormat error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Create a MissingVariable error.
    pub fn missing_variable(name: impl Into<String>) -> Self {
        Self::MissingVariable { name: name.into() }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected,
            found,
        }
    }

    /// Whether this is the unit incompatibility failure surfaced to users.
    pub fn is_unit_conversion(&self) -> bool {
        matches!(self, Self::UnitConversion { .. })
    }
}

impl From<netcdf::Error> for SpecplotError {
    fn from(err: netcdf::Error) -> Self {
        Self::NetCDF(err.to_string())
    }
}
