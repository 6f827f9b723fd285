//! NetCDF reader for gridded climate and emissions data.
//!
//! Opens NetCDF-3/4 files through the native `netcdf` library and exposes
//! them through the [`grid_common::GridDataset`] abstraction.
//!
//! # CF decoding
//!
//! Reads apply the subset of CF conventions that affects aggregation:
//!
//! - `_FillValue` and `missing_value` cells become `NaN`
//! - `scale_factor` / `add_offset` packing is undone
//! - 1-D coordinate variables named after a dimension become coordinates
//! - the time coordinate is decoded from its `units` and `calendar` attributes

mod dataset;
pub mod error;
mod native;

pub use dataset::{NetCdfDataset, NetCdfLoader};
pub use error::{NetCdfError, NetCdfResult};
pub use native::silence_hdf5_errors;
