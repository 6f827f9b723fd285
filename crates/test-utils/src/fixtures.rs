//! Common test fixtures for aggregation tests.
//!
//! This module provides pre-defined boxes and coordinate axes that represent
//! the usual layouts of global emission grids.

/// Common bounding box definitions for testing.
pub mod bbox {
    use grid_common::BoundingBox;

    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: BoundingBox = BoundingBox {
        lon_min: -180.0,
        lat_min: -90.0,
        lon_max: 180.0,
        lat_max: 90.0,
    };

    /// Europe bounding box
    pub const EUROPE: BoundingBox = BoundingBox {
        lon_min: -15.0,
        lat_min: 35.0,
        lon_max: 45.0,
        lat_max: 72.0,
    };

    /// Western hemisphere slice that needs wrapping on 0..360 grids
    pub const WEST_ATLANTIC: BoundingBox = BoundingBox {
        lon_min: -60.0,
        lat_min: 0.0,
        lon_max: -30.0,
        lat_max: 30.0,
    };

    /// Single point (degenerate bbox)
    pub const POINT: BoundingBox = BoundingBox {
        lon_min: 0.0,
        lat_min: 0.0,
        lon_max: 0.0,
        lat_max: 0.0,
    };

    /// Crosses antimeridian; selects nothing since there is no wrap-around
    pub const PACIFIC: BoundingBox = BoundingBox {
        lon_min: 160.0,
        lat_min: -50.0,
        lon_max: -140.0,
        lat_max: 50.0,
    };
}

/// Common coordinate axes for testing.
pub mod axes {
    use crate::generators::regular_axis;

    /// Longitudes 0, step, ... below 360.
    pub fn lons_0_360(step: f64) -> Vec<f64> {
        regular_axis(0.0, step, (360.0 / step) as usize)
    }

    /// Longitudes -180, -180 + step, ... up to 180 inclusive.
    pub fn lons_180(step: f64) -> Vec<f64> {
        regular_axis(-180.0, step, (360.0 / step) as usize + 1)
    }

    /// Latitudes from -90 up to 90 inclusive.
    pub fn lats_ascending(step: f64) -> Vec<f64> {
        regular_axis(-90.0, step, (180.0 / step) as usize + 1)
    }

    /// Latitudes from 90 down to -90 inclusive.
    pub fn lats_descending(step: f64) -> Vec<f64> {
        regular_axis(90.0, -step, (180.0 / step) as usize + 1)
    }
}
