//! Per-source pipeline and the multi-source run.

use std::path::{Path, PathBuf};

use grid_common::{merge_series, BoundingBox, DatasetLoader, GridDataset, GridError, SeriesPoint};
use tracing::{debug, info};

use crate::config::{AggregatorConfig, NormalizationMode};
use crate::error::{AggregationError, Result};
use crate::label::label_reduction;
use crate::reduce::reduce_bbox;

/// A validated aggregation request.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRequest {
    pub inputs: Vec<PathBuf>,
    pub variable: String,
    pub bbox: BoundingBox,
}

impl AggregationRequest {
    /// Build a request from raw option strings.
    ///
    /// `inputs` is a comma-separated path list; `bbox` is
    /// `lon_min,lat_min,lon_max,lat_max`.
    pub fn from_args(inputs: &str, bbox: &str, variable: &str) -> Result<Self> {
        let bbox = BoundingBox::parse(bbox)?;
        Ok(Self {
            inputs: split_inputs(inputs),
            variable: variable.to_string(),
            bbox,
        })
    }
}

/// Split a comma-separated input list. No escaping is supported.
pub fn split_inputs(inputs: &str) -> Vec<PathBuf> {
    inputs.split(',').map(PathBuf::from).collect()
}

/// Points from one source and the bbox they were computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    pub points: Vec<SeriesPoint>,
    pub bbox: BoundingBox,
}

/// Sums a variable over a bbox across a list of datasets.
pub struct Aggregator<L> {
    loader: L,
    config: AggregatorConfig,
}

impl<L: DatasetLoader> Aggregator<L> {
    pub fn new(loader: L, config: AggregatorConfig) -> Self {
        Self { loader, config }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Process every input in order and return the merged, sorted series.
    ///
    /// The first failing source aborts the run.
    pub fn run(&self, request: &AggregationRequest) -> Result<Vec<SeriesPoint>> {
        info!(
            sources = request.inputs.len(),
            variable = %request.variable,
            bbox = %request.bbox,
            normalization = %self.config.normalization,
            "Starting bbox aggregation"
        );

        let mut working = request.bbox;
        let mut per_source = Vec::with_capacity(request.inputs.len());

        for path in &request.inputs {
            let start = match self.config.normalization {
                NormalizationMode::Reset => request.bbox,
                NormalizationMode::Carry => working,
            };
            let outcome = self.process_source(path, &request.variable, start)?;
            working = outcome.bbox;
            per_source.push(outcome.points);
        }

        let series = merge_series(per_source);
        info!(rows = series.len(), "Aggregation complete");
        Ok(series)
    }

    /// Load, normalize, reduce and label a single source.
    ///
    /// The dataset handle is released before reduction starts.
    pub fn process_source(
        &self,
        path: &Path,
        variable: &str,
        bbox: BoundingBox,
    ) -> Result<SourceOutcome> {
        let var = {
            let dataset = self.loader.open(path)?;
            if !dataset.contains_variable(variable) {
                return Err(variable_not_found(variable, path));
            }
            dataset
                .read_variable(variable, &self.config.time_dim)
                .map_err(|e| match e {
                    GridError::VariableNotFound(_) => variable_not_found(variable, path),
                    GridError::InvalidTime(source) => AggregationError::InvalidTime {
                        path: path.display().to_string(),
                        message: source.to_string(),
                    },
                    other => AggregationError::Dataset(other),
                })?
        };

        let normalized = bbox.normalized_for(var.coordinate(&self.config.lon_dim));
        if normalized != bbox {
            debug!(
                path = %path.display(),
                from = %bbox,
                to = %normalized,
                "Wrapped bbox longitudes to the 0-360 convention"
            );
        }

        let reduction = reduce_bbox(&var, &normalized, &self.config)?;
        let points = label_reduction(reduction, path)?;

        info!(
            path = %path.display(),
            variable = %variable,
            points = points.len(),
            "Aggregated source"
        );

        Ok(SourceOutcome {
            points,
            bbox: normalized,
        })
    }
}

fn variable_not_found(variable: &str, path: &Path) -> AggregationError {
    AggregationError::VariableNotFound {
        variable: variable.to_string(),
        path: path.display().to_string(),
    }
}
