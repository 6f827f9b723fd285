//! Gridded variables and the dataset access abstraction.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{GridError, GridResult};
use crate::time::TimeAxis;

/// A named dimension of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub len: usize,
}

impl Dimension {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
        }
    }
}

/// A variable loaded from a gridded dataset.
///
/// Values are stored row-major over `dimensions`, with missing cells (fill
/// values, masked points) represented as `NaN`.
#[derive(Debug, Clone)]
pub struct GriddedVariable {
    pub name: String,
    dimensions: Vec<Dimension>,
    values: Vec<f64>,
    coordinates: HashMap<String, Vec<f64>>,
    time: Option<TimeAxis>,
}

impl GriddedVariable {
    /// Create a variable, checking that `values` matches the dimension shape.
    pub fn new(
        name: impl Into<String>,
        dimensions: Vec<Dimension>,
        values: Vec<f64>,
    ) -> GridResult<Self> {
        let name = name.into();
        let expected: usize = dimensions.iter().map(|d| d.len).product();
        if values.len() != expected {
            return Err(GridError::ShapeMismatch {
                name,
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            name,
            dimensions,
            values,
            coordinates: HashMap::new(),
            time: None,
        })
    }

    /// Attach 1-D coordinate values for one of this variable's dimensions.
    pub fn with_coordinate(mut self, dim: &str, values: Vec<f64>) -> GridResult<Self> {
        let len = self
            .dimension(dim)
            .map(|d| d.len)
            .ok_or_else(|| GridError::read_failed(format!("'{}' has no dimension '{}'", self.name, dim)))?;
        if values.len() != len {
            return Err(GridError::ShapeMismatch {
                name: dim.to_string(),
                expected: len,
                actual: values.len(),
            });
        }
        self.coordinates.insert(dim.to_string(), values);
        Ok(self)
    }

    /// Attach a decoded time coordinate for dimension `dim`.
    pub fn with_time_axis(mut self, dim: &str, axis: TimeAxis) -> GridResult<Self> {
        let len = self
            .dimension(dim)
            .map(|d| d.len)
            .ok_or_else(|| GridError::read_failed(format!("'{}' has no dimension '{}'", self.name, dim)))?;
        if axis.len() != len {
            return Err(GridError::ShapeMismatch {
                name: dim.to_string(),
                expected: len,
                actual: axis.len(),
            });
        }
        self.time = Some(axis);
        Ok(self)
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Position of a dimension in the storage order.
    pub fn axis_of(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.name == name)
    }

    pub fn shape(&self) -> Vec<usize> {
        self.dimensions.iter().map(|d| d.len).collect()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Coordinate values of a dimension, if the dataset provided them.
    pub fn coordinate(&self, dim: &str) -> Option<&[f64]> {
        self.coordinates.get(dim).map(Vec::as_slice)
    }

    pub fn time_axis(&self) -> Option<&TimeAxis> {
        self.time.as_ref()
    }
}

/// Read access to one opened dataset.
pub trait GridDataset {
    /// Names of all variables (data and coordinate) in the dataset.
    fn variable_names(&self) -> Vec<String>;

    fn contains_variable(&self, name: &str) -> bool {
        self.variable_names().iter().any(|v| v == name)
    }

    /// Load a variable together with its coordinates.
    ///
    /// `time_dim` names the dimension whose coordinate should be decoded as a
    /// CF time axis when present.
    fn read_variable(&self, name: &str, time_dim: &str) -> GridResult<GriddedVariable>;
}

/// Opens datasets from paths.
pub trait DatasetLoader {
    type Dataset: GridDataset;

    fn open(&self, path: &Path) -> GridResult<Self::Dataset>;
}
