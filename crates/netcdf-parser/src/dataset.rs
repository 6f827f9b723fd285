//! NetCDF implementation of the grid dataset abstraction.

use std::path::Path;

use grid_common::{
    DatasetLoader, Dimension, GridDataset, GridError, GridResult, GriddedVariable, TimeAxis,
    TimeParseError, TimeUnits,
};
use tracing::{debug, warn};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{get_f64_attr, get_f64s_attr, get_str_attr, silence_hdf5_errors};

/// Opens NetCDF files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetCdfLoader;

impl DatasetLoader for NetCdfLoader {
    type Dataset = NetCdfDataset;

    fn open(&self, path: &Path) -> GridResult<NetCdfDataset> {
        NetCdfDataset::open(path)
            .map_err(|e| GridError::open_failed(path.display().to_string(), e.to_string()))
    }
}

/// An open NetCDF file. The underlying handle closes on drop.
pub struct NetCdfDataset {
    file: netcdf::File,
}

impl NetCdfDataset {
    pub fn open(path: impl AsRef<Path>) -> NetCdfResult<Self> {
        // Silence HDF5's verbose stderr output for missing attributes
        silence_hdf5_errors();

        let path = path.as_ref();
        let file = netcdf::open(path)?;
        debug!(path = %path.display(), "Opened NetCDF dataset");
        Ok(Self { file })
    }

    fn load_variable(&self, name: &str, time_dim: &str) -> NetCdfResult<GriddedVariable> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| NetCdfError::Grid(GridError::VariableNotFound(name.to_string())))?;

        let dimensions: Vec<Dimension> = var
            .dimensions()
            .iter()
            .map(|d| Dimension::new(d.name().to_string(), d.len()))
            .collect();

        let values = read_unpacked(&var)?;
        let mut gridded = GriddedVariable::new(name, dimensions.clone(), values)?;

        for dim in &dimensions {
            if dim.name == time_dim {
                if let Some(axis) = self.read_time_axis(&dim.name)? {
                    gridded = gridded.with_time_axis(&dim.name, axis)?;
                }
            } else if let Some(coords) = self.read_coordinate(dim)? {
                gridded = gridded.with_coordinate(&dim.name, coords)?;
            }
        }

        Ok(gridded)
    }

    /// Values of the 1-D coordinate variable sharing a dimension's name.
    fn read_coordinate(&self, dim: &Dimension) -> NetCdfResult<Option<Vec<f64>>> {
        let Some(var) = self.file.variable(&dim.name) else {
            return Ok(None);
        };
        if !is_coordinate_of(&var, dim) {
            warn!(
                variable = %dim.name,
                "Variable shares a dimension name but is not a 1-D coordinate; ignoring"
            );
            return Ok(None);
        }
        Ok(Some(read_unpacked(&var)?))
    }

    fn read_time_axis(&self, dim_name: &str) -> NetCdfResult<Option<TimeAxis>> {
        let Some(var) = self.file.variable(dim_name) else {
            return Ok(None);
        };

        let units = get_str_attr(&var, "units").ok_or_else(|| NetCdfError::InvalidTime {
            variable: dim_name.to_string(),
            source: TimeParseError::InvalidUnits("<missing>".to_string()),
        })?;
        let calendar = get_str_attr(&var, "calendar");
        let units = TimeUnits::parse(&units, calendar.as_deref()).map_err(|source| {
            NetCdfError::InvalidTime {
                variable: dim_name.to_string(),
                source,
            }
        })?;

        let values = read_numeric(&var)?;
        Ok(Some(TimeAxis::new(values, units)))
    }
}

impl GridDataset for NetCdfDataset {
    fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name().to_string()).collect()
    }

    fn contains_variable(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    fn read_variable(&self, name: &str, time_dim: &str) -> GridResult<GriddedVariable> {
        Ok(self.load_variable(name, time_dim)?)
    }
}

fn is_coordinate_of(var: &netcdf::Variable, dim: &Dimension) -> bool {
    let dims = var.dimensions();
    dims.len() == 1 && dims[0].name() == dim.name && dims[0].len() == dim.len
}

/// Read a variable as f64, masking fill values to NaN and applying
/// `scale_factor`/`add_offset` packing.
fn read_unpacked(var: &netcdf::Variable) -> NetCdfResult<Vec<f64>> {
    let raw = read_numeric(var)?;

    let mut fill_values = get_f64s_attr(var, "_FillValue").unwrap_or_default();
    fill_values.extend(get_f64s_attr(var, "missing_value").unwrap_or_default());
    let scale_factor = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let add_offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);

    Ok(unpack(raw, &fill_values, scale_factor, add_offset))
}

/// Read any numeric variable as f64.
///
/// Tries each primitive type in turn, for storage types the library will not
/// convert to double on read.
fn read_numeric(var: &netcdf::Variable) -> NetCdfResult<Vec<f64>> {
    macro_rules! try_read {
        ($($ty:ty),+) => {
            $(
                if let Ok(values) = var.get_values::<$ty, _>(..) {
                    return Ok(values.into_iter().map(|v| v as f64).collect());
                }
            )+
        };
    }

    try_read!(f64, f32, i32, i16, i8, u8, u16, u32, i64, u64);

    Err(NetCdfError::InvalidFormat(format!(
        "variable '{}' is not numeric",
        var.name()
    )))
}

fn unpack(raw: Vec<f64>, fill_values: &[f64], scale_factor: f64, add_offset: f64) -> Vec<f64> {
    raw.into_iter()
        .map(|v| {
            if fill_values.contains(&v) {
                f64::NAN
            } else {
                v * scale_factor + add_offset
            }
        })
        .collect()
}
