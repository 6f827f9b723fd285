//! Error types for NetCDF parsing operations.

use grid_common::{GridError, TimeParseError};
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// NetCDF library error
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Undecodable time coordinate
    #[error("Invalid time coordinate '{variable}': {source}")]
    InvalidTime {
        variable: String,
        #[source]
        source: TimeParseError,
    },

    /// Variable/coordinate layout rejected by the grid model
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl From<NetCdfError> for GridError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::Grid(inner) => inner,
            NetCdfError::InvalidTime { source, .. } => GridError::InvalidTime(source),
            other => GridError::read_failed(other.to_string()),
        }
    }
}
