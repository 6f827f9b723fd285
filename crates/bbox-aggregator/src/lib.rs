//! Bounding-box aggregation of gridded datasets into yearly series.
//!
//! For each input dataset the aggregator:
//!
//! 1. opens it through a [`grid_common::DatasetLoader`]
//! 2. wraps the bbox longitudes to 0..360 when the grid uses that convention
//! 3. sums the variable over the selected lat/lon cells, skipping missing values
//! 4. labels each sum with a year, taken from the time axis or, for grids
//!    without one, from the file name
//!
//! Per-source results are concatenated and sorted by year label.
//!
//! # Example
//!
//! ```ignore
//! use bbox_aggregator::{AggregationRequest, Aggregator, AggregatorConfig};
//! use netcdf_parser::NetCdfLoader;
//!
//! let request = AggregationRequest::from_args("edgar_2019.nc,edgar_2020.nc", "-10,35,30,60", "emi_co2")?;
//! let aggregator = Aggregator::new(NetCdfLoader, AggregatorConfig::default());
//! let series = aggregator.run(&request)?;
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod label;
pub mod reduce;

pub use aggregator::{split_inputs, AggregationRequest, Aggregator, SourceOutcome};
pub use config::{AggregatorConfig, NormalizationMode};
pub use error::{AggregationError, Result};
pub use label::{label_reduction, year_from_filename};
pub use reduce::{reduce_bbox, Reduction, Selection};
