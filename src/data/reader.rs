//! Spectrum file readers.

use super::SpectrumLayer;
use crate::error::{Result, SpecplotError};
use crate::units::{Quantity, Unit};
use ndarray::Array1;
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::path::Path;

/// Options controlling how spectra are located in files.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// NetCDF variable holding the spectral axis.
    pub dispersion_var: String,
    /// NetCDF variable holding the flux.
    pub flux_var: String,
    /// NetCDF variable holding the uncertainty (optional in the file).
    pub uncertainty_var: String,
    /// Dispersion unit used when a file does not declare one.
    pub default_x_unit: String,
    /// Flux unit used when a file does not declare one.
    pub default_y_unit: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            dispersion_var: "dispersion".to_string(),
            flux_var: "flux".to_string(),
            uncertainty_var: "uncertainty".to_string(),
            default_x_unit: "Angstrom".to_string(),
            default_y_unit: "erg/s/cm^2/Angstrom".to_string(),
        }
    }
}

/// Spectrum reader.
#[derive(Debug)]
pub struct SpectrumReader;

impl SpectrumReader {
    /// Read a spectrum, choosing the format from the file extension.
    pub fn read_file(path: &Path, options: &ReadOptions) -> Result<SpectrumLayer> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "nc" | "nc4" | "netcdf" => Self::read_netcdf(path, options),
            "fits" | "fit" | "hdf5" | "h5" => Err(SpecplotError::unsupported_format(extension)),
            _ => Self::read_ascii(path, options),
        }
    }

    fn layer_name(path: &Path) -> String {
        path.file_stem()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "spectrum".to_string())
    }

    fn read_netcdf(path: &Path, options: &ReadOptions) -> Result<SpectrumLayer> {
        let file = netcdf::open(path)
            .map_err(|e| SpecplotError::NetCDF(format!("Failed to open file: {}", e)))?;

        let (dispersion, x_unit) = Self::read_netcdf_variable(&file, &options.dispersion_var)?;
        let (flux, y_unit) = Self::read_netcdf_variable(&file, &options.flux_var)?;

        let uncertainty = if file.variable(&options.uncertainty_var).is_some() {
            let (values, _) = Self::read_netcdf_variable(&file, &options.uncertainty_var)?;
            Some(values)
        } else {
            tracing::debug!("No '{}' variable, plotting without errors", options.uncertainty_var);
            None
        };

        let x_unit = Unit::parse(x_unit.as_deref().unwrap_or(&options.default_x_unit))?;
        let y_unit = Unit::parse(y_unit.as_deref().unwrap_or(&options.default_y_unit))?;

        tracing::info!(
            "Read {} samples from {} ({} / {})",
            dispersion.len(),
            path.display(),
            x_unit,
            y_unit
        );

        SpectrumLayer::new(
            Self::layer_name(path),
            Quantity::new(dispersion, x_unit),
            Quantity::new(flux, y_unit),
            uncertainty,
        )
    }

    /// Read a 1D variable as f64 plus its `units` attribute.
    fn read_netcdf_variable(
        file: &netcdf::File,
        name: &str,
    ) -> Result<(Array1<f64>, Option<String>)> {
        let var = file
            .variable(name)
            .ok_or_else(|| SpecplotError::missing_variable(name))?;

        let mut units = None;
        let mut scale_factor = 1.0;
        let mut add_offset = 0.0;
        for attr in var.attributes() {
            let value = Self::attr_value_to_string(&attr);
            match attr.name() {
                "units" => units = Some(value),
                "scale_factor" => scale_factor = value.parse::<f64>().unwrap_or(1.0),
                "add_offset" => add_offset = value.parse::<f64>().unwrap_or(0.0),
                _ => {}
            }
        }

        let mut data = Self::read_values(&var)?;

        // CF packing convention
        if scale_factor != 1.0 || add_offset != 0.0 {
            data.mapv_inplace(|v| v * scale_factor + add_offset);
        }

        Ok((data, units))
    }

    fn read_values(var: &netcdf::Variable<'_>) -> Result<Array1<f64>> {
        let vartype = var.vartype();
        let read_err = |e: netcdf::Error| {
            SpecplotError::NetCDF(format!("Failed to read '{}': {}", var.name(), e))
        };

        let values: Vec<f64> = match vartype {
            NcVariableType::Float(FloatType::F64) => var.get_values(..).map_err(read_err)?,
            NcVariableType::Float(FloatType::F32) => {
                let values: Vec<f32> = var.get_values(..).map_err(read_err)?;
                values.into_iter().map(f64::from).collect()
            }
            NcVariableType::Int(IntType::I64) => {
                let values: Vec<i64> = var.get_values(..).map_err(read_err)?;
                values.into_iter().map(|x| x as f64).collect()
            }
            NcVariableType::Int(IntType::I32) => {
                let values: Vec<i32> = var.get_values(..).map_err(read_err)?;
                values.into_iter().map(f64::from).collect()
            }
            NcVariableType::Int(IntType::I16) => {
                let values: Vec<i16> = var.get_values(..).map_err(read_err)?;
                values.into_iter().map(f64::from).collect()
            }
            NcVariableType::Int(IntType::U32) => {
                let values: Vec<u32> = var.get_values(..).map_err(read_err)?;
                values.into_iter().map(f64::from).collect()
            }
            NcVariableType::Int(IntType::U16) => {
                let values: Vec<u16> = var.get_values(..).map_err(read_err)?;
                values.into_iter().map(f64::from).collect()
            }
            _ => {
                return Err(SpecplotError::NetCDF(format!(
                    "Unsupported variable type for '{}': {:?}",
                    var.name(),
                    vartype
                )))
            }
        };

        Ok(Array1::from(values))
    }

    fn attr_value_to_string(attr: &netcdf::Attribute<'_>) -> String {
        use netcdf::AttributeValue;

        match attr.value() {
            Ok(AttributeValue::Str(v)) => v,
            Ok(AttributeValue::Strs(v)) => v.join(", "),
            Ok(AttributeValue::Float(v)) => format!("{}", v),
            Ok(AttributeValue::Double(v)) => format!("{}", v),
            Ok(AttributeValue::Short(v)) => format!("{}", v),
            Ok(AttributeValue::Int(v)) => format!("{}", v),
            Ok(AttributeValue::Longlong(v)) => format!("{}", v),
            Ok(other) => format!("{:?}", other),
            Err(_) => format!("{:?}", attr),
        }
    }

    fn read_ascii(path: &Path, options: &ReadOptions) -> Result<SpectrumLayer> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SpecplotError::file_open(path.to_path_buf(), e))?;
        let layer = parse_ascii(&text, options, Self::layer_name(path))?;
        tracing::info!("Read {} samples from {}", layer.len(), path.display());
        Ok(layer)
    }
}

/// Parse a whitespace or comma separated table of 2 or 3 columns.
///
/// A `# units: <x> | <y>` comment (or `# units: <x> <y>` when neither unit
/// contains spaces) declares the units.
pub fn parse_ascii(text: &str, options: &ReadOptions, name: String) -> Result<SpectrumLayer> {
    let mut x_unit: Option<String> = None;
    let mut y_unit: Option<String> = None;
    let mut dispersion = Vec::new();
    let mut flux = Vec::new();
    let mut uncertainty = Vec::new();
    let mut columns: Option<usize> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(header) = comment.trim().strip_prefix("units:") {
                let (x, y) = split_units(header).ok_or_else(|| SpecplotError::Parse {
                    line: line_no,
                    reason: "expected two units".to_string(),
                })?;
                x_unit = Some(x);
                y_unit = Some(y);
            }
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty())
            .collect();

        let expected = *columns.get_or_insert(fields.len());
        if !(2..=3).contains(&fields.len()) || fields.len() != expected {
            return Err(SpecplotError::Parse {
                line: line_no,
                reason: format!("expected {} columns, found {}", expected.clamp(2, 3), fields.len()),
            });
        }

        let mut values = [0.0; 3];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field.parse::<f64>().map_err(|_| SpecplotError::Parse {
                line: line_no,
                reason: format!("'{}' is not a number", field),
            })?;
        }

        dispersion.push(values[0]);
        flux.push(values[1]);
        if fields.len() == 3 {
            uncertainty.push(values[2]);
        }
    }

    let x_unit = Unit::parse(x_unit.as_deref().unwrap_or(&options.default_x_unit))?;
    let y_unit = Unit::parse(y_unit.as_deref().unwrap_or(&options.default_y_unit))?;
    let uncertainty = (columns == Some(3)).then(|| Array1::from(uncertainty));

    SpectrumLayer::new(
        name,
        Quantity::from_vec(dispersion, x_unit),
        Quantity::from_vec(flux, y_unit),
        uncertainty,
    )
}

fn split_units(header: &str) -> Option<(String, String)> {
    if let Some((x, y)) = header.split_once('|') {
        let (x, y) = (x.trim(), y.trim());
        return (!x.is_empty() && !y.is_empty()).then(|| (x.to_string(), y.to_string()));
    }

    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), None) => Some((x.to_string(), y.to_string())),
        _ => None,
    }
}
