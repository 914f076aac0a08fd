use specplot::data::{Layer, ReadOptions, SpectrumReader};
use specplot::units::Unit;
use specplot::SpecplotError;
use std::io::Write;
use tempfile::NamedTempFile;

fn text_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_read_text_spectrum() {
    let file = text_file("# demo spectrum\n# units: nm | erg/s/cm^2/Angstrom\n400 1.0 0.1\n410 2.0 0.2\n");
    let layer = SpectrumReader::read_file(file.path(), &ReadOptions::default()).unwrap();

    assert_eq!(layer.len(), 2);
    assert_eq!(layer.dispersion().unit, Unit::parse("nm").unwrap());
    assert_eq!(layer.data().unit, Unit::parse("erg/s/cm^2/AA").unwrap());
    assert_eq!(layer.dispersion_range(), Some((400.0, 410.0)));
    assert_eq!(layer.flux_range(), Some((1.0, 2.0)));
}

#[test]
fn test_read_text_uses_default_units() {
    let file = text_file("1 2\n3 4\n");
    let options = ReadOptions {
        default_x_unit: "um".to_string(),
        default_y_unit: "mJy".to_string(),
        ..ReadOptions::default()
    };
    let layer = SpectrumReader::read_file(file.path(), &options).unwrap();
    assert_eq!(layer.layer_units().0, Unit::parse("um").unwrap());
    assert_eq!(layer.layer_units().1, Unit::parse("mJy").unwrap());
}

#[test]
fn test_read_text_bad_unit() {
    let file = text_file("# units: nm | furlongs\n1 2\n");
    let err = SpectrumReader::read_file(file.path(), &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, SpecplotError::UnitParse { .. }));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SpectrumReader::read_file(&dir.path().join("absent.txt"), &ReadOptions::default())
        .unwrap_err();
    assert!(matches!(err, SpecplotError::FileOpen { .. }));
}

#[test]
fn test_read_netcdf_spectrum() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spectrum.nc");

    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("spectral", 3).unwrap();

        let mut var = file.add_variable::<f64>("dispersion", &["spectral"]).unwrap();
        var.put_values([500.0f64, 501.0, 502.0].as_slice(), ..).unwrap();
        var.put_attribute("units", "nm").unwrap();

        let mut var = file.add_variable::<f32>("flux", &["spectral"]).unwrap();
        var.put_values([1.0f32, 2.0, 3.0].as_slice(), ..).unwrap();
        var.put_attribute("units", "erg/s/cm^2/Angstrom").unwrap();
        var.put_attribute("scale_factor", 2.0f64).unwrap();
    }

    let layer = SpectrumReader::read_file(&path, &ReadOptions::default()).unwrap();
    assert_eq!(layer.len(), 3);
    assert_eq!(layer.dispersion().unit, Unit::parse("nm").unwrap());
    assert_eq!(layer.data().value.to_vec(), vec![2.0, 4.0, 6.0]);
    assert!(layer.uncertainty().is_none());
}

#[test]
fn test_read_netcdf_missing_flux() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.nc");

    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("spectral", 1).unwrap();
        let mut var = file.add_variable::<f64>("dispersion", &["spectral"]).unwrap();
        var.put_values([1.0f64].as_slice(), ..).unwrap();
    }

    let err = SpectrumReader::read_file(&path, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err, SpecplotError::MissingVariable { ref name } if name == "flux"));
}
