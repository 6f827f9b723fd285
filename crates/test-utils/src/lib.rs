//! Shared test utilities for the bbox-aggregate workspace.
//!
//! This crate provides common testing infrastructure including:
//! - An in-memory dataset loader
//! - Grid builders with predictable values
//! - Common bounding boxes and coordinate axes
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, MemoryLoader};
//! ```

pub mod fixtures;
pub mod generators;
pub mod memory;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use memory::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of a series against `(period, value)` pairs.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_series_approx_eq;
///
/// assert_series_approx_eq!(series, [("2019", 1.0), ("2020", 2.0)], 1e-9);
/// ```
#[macro_export]
macro_rules! assert_series_approx_eq {
    ($series:expr, [$(($period:expr, $value:expr)),* $(,)?], $epsilon:expr) => {{
        let series = &$series;
        let expected: Vec<(&str, f64)> = vec![$(($period, $value as f64)),*];
        assert_eq!(
            series.len(),
            expected.len(),
            "series length mismatch: {:?}",
            series
        );
        for (point, (period, value)) in series.iter().zip(expected) {
            assert_eq!(point.period, period);
            $crate::assert_approx_eq!(point.value, value, $epsilon);
        }
    }};
}
