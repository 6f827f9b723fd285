//! Error types for bbox aggregation.

use grid_common::{BboxParseError, GridError};
use thiserror::Error;

/// Errors that abort an aggregation run.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Variable {variable} not found in dataset {path}")]
    VariableNotFound { variable: String, path: String },

    #[error("No year found in filename: {0}")]
    MissingYear(String),

    #[error("Variable '{variable}' has no '{dimension}' dimension")]
    MissingDimension { variable: String, dimension: String },

    #[error("Variable '{variable}' has unsupported dimension '{dimension}'; only the spatial and time dimensions can be present")]
    UnsupportedDimension { variable: String, dimension: String },

    #[error("Time dimension '{dimension}' of '{variable}' has no time coordinate")]
    MissingTimeCoordinate { variable: String, dimension: String },

    #[error("Invalid time axis in {path}: {message}")]
    InvalidTime { path: String, message: String },

    #[error("Dataset error: {0}")]
    Dataset(#[from] GridError),
}

impl From<BboxParseError> for AggregationError {
    fn from(err: BboxParseError) -> Self {
        AggregationError::InvalidArgument(err.to_string())
    }
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregationError>;
