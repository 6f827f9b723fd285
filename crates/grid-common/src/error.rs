//! Error types for gridded dataset access.

use thiserror::Error;

use crate::time::TimeParseError;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while opening or reading a gridded dataset.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Failed to open dataset {path}: {message}")]
    OpenFailed { path: String, message: String },

    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    #[error("Failed to read data: {0}")]
    DataReadError(String),

    #[error("Shape mismatch for '{name}': expected {expected} values, got {actual}")]
    ShapeMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid time coordinate: {0}")]
    InvalidTime(#[from] TimeParseError),
}

impl GridError {
    /// Create an OpenFailed error.
    pub fn open_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OpenFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a DataReadError.
    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::DataReadError(msg.into())
    }
}
