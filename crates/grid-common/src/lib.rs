//! Common types and utilities shared across the bbox aggregation crates.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod series;
pub mod time;

pub use bbox::{uses_0_360_convention, wrap_longitude_360, BboxParseError, BoundingBox};
pub use error::{GridError, GridResult};
pub use grid::{DatasetLoader, Dimension, GridDataset, GriddedVariable};
pub use series::{merge_series, to_json_document, SeriesPoint};
pub use time::{Calendar, TimeAxis, TimeParseError, TimeUnits};
