//! Bounding box types and longitude-convention handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Longitude above which a grid is taken to use the 0..360 convention.
pub const LON_360_THRESHOLD: f64 = 180.0;

/// A geographic bounding box in degrees.
///
/// No ordering is enforced between the min and max bounds. Selection against a
/// box whose `lon_min` exceeds `lon_max` is simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lat_min: f64,
    pub lon_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(lon_min: f64, lat_min: f64, lon_max: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lat_min,
            lon_max,
            lat_max,
        }
    }

    /// Parse a bbox string: "lon_min,lat_min,lon_max,lat_max"
    ///
    /// Whitespace around each token is ignored; blank tokens are rejected.
    pub fn parse(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let number = |part: &str| -> Result<f64, BboxParseError> {
            part.trim()
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self {
            lon_min: number(parts[0])?,
            lat_min: number(parts[1])?,
            lon_max: number(parts[2])?,
            lat_max: number(parts[3])?,
        })
    }

    /// Check if a longitude falls within `[lon_min, lon_max]`.
    pub fn contains_lon(&self, lon: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max
    }

    /// Check if a latitude falls within `[lat_min, lat_max]`.
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max
    }

    /// Check if a point is contained within this bbox (inclusive).
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        self.contains_lon(lon) && self.contains_lat(lat)
    }

    /// Map both longitude bounds into `[0, 360)`.
    pub fn wrap_to_360(&self) -> Self {
        Self {
            lon_min: wrap_longitude_360(self.lon_min),
            lon_max: wrap_longitude_360(self.lon_max),
            ..*self
        }
    }

    /// Reconcile this bbox with the longitude convention of a grid.
    ///
    /// Grids whose longitude coordinate peaks above 180 degrees use 0..360, and
    /// the bbox longitudes are wrapped into that range. A missing or empty
    /// longitude coordinate leaves the bbox untouched.
    pub fn normalized_for(&self, grid_lons: Option<&[f64]>) -> Self {
        match grid_lons {
            Some(lons) if uses_0_360_convention(lons) => self.wrap_to_360(),
            _ => *self,
        }
    }
}

impl FromStr for BoundingBox {
    type Err = BboxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.lon_min, self.lat_min, self.lon_max, self.lat_max
        )
    }
}

/// Euclidean modulo 360, so negative longitudes land in `[0, 360)`.
pub fn wrap_longitude_360(lon: f64) -> f64 {
    lon.rem_euclid(360.0)
}

/// True when the largest longitude in `lons` exceeds 180.
pub fn uses_0_360_convention(lons: &[f64]) -> bool {
    // f64::max skips NaN
    lons.iter().copied().fold(f64::NEG_INFINITY, f64::max) > LON_360_THRESHOLD
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bbox format: {0}. Expected 'lon_min,lat_min,lon_max,lat_max'")]
    InvalidFormat(String),

    #[error("Invalid number in bbox: {0}")]
    InvalidNumber(String),
}
