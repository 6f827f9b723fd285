//! Tests for the bbox-aggregate binary.
//!
//! Each test writes small NetCDF files into a temp directory and runs the
//! compiled binary against them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const BIN: &str = env!("CARGO_BIN_EXE_bbox-aggregate");

/// A (lat, lon) emissions grid on a 0..360 longitude axis.
fn write_scalar_file(dir: &Path, name: &str, fill: f64) -> PathBuf {
    let path = dir.join(name);
    let mut file = netcdf::create(&path).expect("create netcdf");

    file.add_dimension("lat", 2).unwrap();
    file.add_dimension("lon", 4).unwrap();

    let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
    lat.put_values(&[40.0, 50.0], ..).unwrap();

    let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
    lon.put_values(&[0.0, 90.0, 180.0, 350.0], ..).unwrap();

    let mut emi = file.add_variable::<f64>("emi_co2", &["lat", "lon"]).unwrap();
    emi.put_attribute("_FillValue", -1.0f64).unwrap();
    emi.put_values(&[fill, fill, fill, fill, fill, -1.0, fill, fill], ..)
        .unwrap();

    path
}

/// A (time, lat, lon) file with two yearly steps.
fn write_time_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = netcdf::create(&path).expect("create netcdf");

    file.add_dimension("time", 2).unwrap();
    file.add_dimension("lat", 1).unwrap();
    file.add_dimension("lon", 2).unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_attribute("units", "hours since 2015-01-01 00:00:00").unwrap();
    time.put_values(&[0.0, 8760.0], ..).unwrap();

    let mut lat = file.add_variable::<f64>("lat", &["lat"]).unwrap();
    lat.put_values(&[45.0], ..).unwrap();

    let mut lon = file.add_variable::<f64>("lon", &["lon"]).unwrap();
    lon.put_values(&[-5.0, 5.0], ..).unwrap();

    let mut emi = file
        .add_variable::<f32>("emi_co2", &["time", "lat", "lon"])
        .unwrap();
    emi.put_values(&[1.0f32, 2.0, 3.0, 4.0], ..).unwrap();

    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("BBOX_AGG_NORMALIZATION")
        .env_remove("BBOX_AGG_LOG_FORMAT")
        .output()
        .expect("run bbox-aggregate")
}

fn join_inputs(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn test_writes_sorted_series() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = [
        write_scalar_file(dir.path(), "edgar_2021_co2.nc", 2.0),
        write_time_file(dir.path(), "edgar_timeseries.nc"),
    ];
    let output = dir.path().join("out/series.json");

    let result = run(
        dir.path(),
        &[
            "--input",
            &join_inputs(&inputs),
            "--bbox",
            "-10,40,10,50",
            "--var",
            "emi_co2",
            "--output",
            output.to_str().unwrap(),
        ],
    );
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(
        stdout.trim_end(),
        format!("Wrote 3 rows to {}", output.display())
    );

    // The 0..360 file wraps the bbox to 350..10 and selects nothing. The
    // -180..180 file selects both longitudes in each year.
    let series: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        series,
        serde_json::json!([
            {"date": "2015", "value": 3.0},
            {"date": "2016", "value": 7.0},
            {"date": "2021", "value": 0.0},
        ])
    );
}

#[test]
fn test_skips_fill_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scalar_file(dir.path(), "edgar_2021_co2.nc", 2.0);
    let output = dir.path().join("series.json");

    let result = run(
        dir.path(),
        &[
            "--input",
            input.to_str().unwrap(),
            "--bbox",
            "0,40,180,50",
            "--var",
            "emi_co2",
            "--output",
            output.to_str().unwrap(),
        ],
    );
    assert!(result.status.success());

    // six cells selected, one of them is the fill value
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "[\n  {\n    \"date\": \"2021\",\n    \"value\": 10.0\n  }\n]\n"
    );
}

#[test]
fn test_invalid_bbox_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scalar_file(dir.path(), "edgar_2021_co2.nc", 1.0);
    let output = dir.path().join("series.json");

    let result = run(
        dir.path(),
        &[
            "--input",
            input.to_str().unwrap(),
            "--bbox",
            "1,2,3",
            "--var",
            "emi_co2",
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Invalid argument"));
    assert!(!output.exists());
}

#[test]
fn test_missing_variable_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = [
        write_scalar_file(dir.path(), "edgar_2020_co2.nc", 1.0),
        write_scalar_file(dir.path(), "edgar_2021_co2.nc", 1.0),
    ];
    let output = dir.path().join("series.json");

    let result = run(
        dir.path(),
        &[
            "--input",
            &join_inputs(&inputs),
            "--bbox",
            "0,40,10,50",
            "--var",
            "emi_ch4",
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("emi_ch4"));
    assert!(!output.exists());
}

#[test]
fn test_missing_year_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scalar_file(dir.path(), "edgar_co2.nc", 1.0);
    let output = dir.path().join("series.json");

    let result = run(
        dir.path(),
        &[
            "--input",
            input.to_str().unwrap(),
            "--bbox",
            "0,40,10,50",
            "--var",
            "emi_co2",
            "--output",
            output.to_str().unwrap(),
        ],
    );

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("No year found"));
    assert!(!output.exists());
}
