//! Spatial reduction of a gridded variable over a bounding box.

use grid_common::{BoundingBox, GriddedVariable, TimeAxis};
use tracing::{debug, warn};

use crate::config::AggregatorConfig;
use crate::error::{AggregationError, Result};

/// Outcome of summing a variable over its spatial dimensions.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    /// No time dimension: one sum for the whole grid.
    Scalar(f64),
    /// One sum per time coordinate, in axis order.
    PerTime { axis: TimeAxis, sums: Vec<f64> },
}

/// Which lat/lon positions fall inside the bbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub lat_mask: Vec<bool>,
    pub lon_mask: Vec<bool>,
}

impl Selection {
    /// Label-based, inclusive selection on each axis.
    ///
    /// Membership is tested per label, so descending axes select the same
    /// cells as ascending ones.
    pub fn new(lats: &[f64], lons: &[f64], bbox: &BoundingBox) -> Self {
        Self {
            lat_mask: lats.iter().map(|&lat| bbox.contains_lat(lat)).collect(),
            lon_mask: lons.iter().map(|&lon| bbox.contains_lon(lon)).collect(),
        }
    }

    pub fn cell_count(&self) -> usize {
        let lats = self.lat_mask.iter().filter(|&&m| m).count();
        let lons = self.lon_mask.iter().filter(|&&m| m).count();
        lats * lons
    }
}

/// Sum `var` over the cells inside `bbox`, per time step if it has one.
///
/// NaN cells contribute nothing. An empty selection sums to 0.
pub fn reduce_bbox(
    var: &GriddedVariable,
    bbox: &BoundingBox,
    config: &AggregatorConfig,
) -> Result<Reduction> {
    let lat_axis = require_axis(var, &config.lat_dim)?;
    let lon_axis = require_axis(var, &config.lon_dim)?;
    let time_axis = var.axis_of(&config.time_dim);

    if let Some(extra) = var.dimensions().iter().find(|d| {
        d.name != config.lat_dim && d.name != config.lon_dim && d.name != config.time_dim
    }) {
        return Err(AggregationError::UnsupportedDimension {
            variable: var.name.clone(),
            dimension: extra.name.clone(),
        });
    }

    let shape = var.shape();
    let lats = labels(var, &config.lat_dim, shape[lat_axis]);
    let lons = labels(var, &config.lon_dim, shape[lon_axis]);
    let selection = Selection::new(&lats, &lons, bbox);

    debug!(
        variable = %var.name,
        bbox = %bbox,
        cells = selection.cell_count(),
        "Selected bbox cells"
    );
    if selection.cell_count() == 0 {
        warn!(variable = %var.name, bbox = %bbox, "Bounding box selects no grid cells; sum is 0");
    }

    let steps = time_axis.map_or(1, |axis| shape[axis]);
    let sums = masked_sums(var.values(), &shape, lat_axis, lon_axis, time_axis, &selection, steps);

    match time_axis {
        None => Ok(Reduction::Scalar(sums[0])),
        Some(_) => {
            let axis = var
                .time_axis()
                .cloned()
                .ok_or_else(|| AggregationError::MissingTimeCoordinate {
                    variable: var.name.clone(),
                    dimension: config.time_dim.clone(),
                })?;
            Ok(Reduction::PerTime { axis, sums })
        }
    }
}

fn require_axis(var: &GriddedVariable, dim: &str) -> Result<usize> {
    var.axis_of(dim)
        .ok_or_else(|| AggregationError::MissingDimension {
            variable: var.name.clone(),
            dimension: dim.to_string(),
        })
}

/// Coordinate labels of a dimension, or its integer positions when the
/// dataset has no coordinate variable for it.
fn labels(var: &GriddedVariable, dim: &str, len: usize) -> Vec<f64> {
    match var.coordinate(dim) {
        Some(coords) => coords.to_vec(),
        None => (0..len).map(|i| i as f64).collect(),
    }
}

fn masked_sums(
    values: &[f64],
    shape: &[usize],
    lat_axis: usize,
    lon_axis: usize,
    time_axis: Option<usize>,
    selection: &Selection,
    steps: usize,
) -> Vec<f64> {
    let mut strides = vec![1usize; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    let index_along = |flat: usize, axis: usize| (flat / strides[axis]) % shape[axis];

    let mut sums = vec![0.0; steps.max(1)];
    for (flat, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        if !selection.lat_mask[index_along(flat, lat_axis)]
            || !selection.lon_mask[index_along(flat, lon_axis)]
        {
            continue;
        }
        let step = time_axis.map_or(0, |axis| index_along(flat, axis));
        sums[step] += value;
    }
    sums.truncate(steps);
    sums
}
