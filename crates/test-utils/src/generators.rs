//! Builders for synthetic gridded variables.
//!
//! These generators create predictable, verifiable grids that can be used
//! across the test suite. Panics on inconsistent input are intentional; they
//! only run in tests.

use chrono::{NaiveDate, NaiveDateTime};
use grid_common::{Dimension, GriddedVariable, TimeAxis};

/// Evenly spaced axis values: `start, start + step, ...` (`count` values).
///
/// # Example
///
/// ```
/// use test_utils::regular_axis;
///
/// assert_eq!(regular_axis(0.0, 0.5, 3), vec![0.0, 0.5, 1.0]);
/// assert_eq!(regular_axis(1.0, -1.0, 3), vec![1.0, 0.0, -1.0]);
/// ```
pub fn regular_axis(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

/// A `(lat, lon)` variable with coordinates, valued by `f(lat, lon)`.
pub fn lat_lon_grid<F>(name: &str, lats: &[f64], lons: &[f64], f: F) -> GriddedVariable
where
    F: Fn(f64, f64) -> f64,
{
    let values = lats
        .iter()
        .flat_map(|&lat| lons.iter().map(move |&lon| (lat, lon)))
        .map(|(lat, lon)| f(lat, lon))
        .collect();

    GriddedVariable::new(
        name,
        vec![
            Dimension::new("lat", lats.len()),
            Dimension::new("lon", lons.len()),
        ],
        values,
    )
    .and_then(|v| v.with_coordinate("lat", lats.to_vec()))
    .and_then(|v| v.with_coordinate("lon", lons.to_vec()))
    .expect("consistent lat/lon grid")
}

/// A `(time, lat, lon)` variable with a decoded time axis.
///
/// `f(step, lat, lon)` gives the value of each cell, where `step` is the
/// index into `times`.
pub fn time_lat_lon_grid<F>(
    name: &str,
    times: &[NaiveDateTime],
    lats: &[f64],
    lons: &[f64],
    f: F,
) -> GriddedVariable
where
    F: Fn(usize, f64, f64) -> f64,
{
    let mut values = Vec::with_capacity(times.len() * lats.len() * lons.len());
    for step in 0..times.len() {
        for &lat in lats {
            for &lon in lons {
                values.push(f(step, lat, lon));
            }
        }
    }

    GriddedVariable::new(
        name,
        vec![
            Dimension::new("time", times.len()),
            Dimension::new("lat", lats.len()),
            Dimension::new("lon", lons.len()),
        ],
        values,
    )
    .and_then(|v| v.with_time_axis("time", TimeAxis::from_datetimes(times)))
    .and_then(|v| v.with_coordinate("lat", lats.to_vec()))
    .and_then(|v| v.with_coordinate("lon", lons.to_vec()))
    .expect("consistent time/lat/lon grid")
}

/// Midnight on January 1st of each year.
pub fn yearly_times(years: &[i32]) -> Vec<NaiveDateTime> {
    years
        .iter()
        .map(|&year| {
            NaiveDate::from_ymd_opt(year, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("valid year")
        })
        .collect()
}
