//! Low-level helpers around the native netcdf library.
//!
//! The netcdf crate wraps libnetcdf/HDF5. HDF5 reports every failed lookup on
//! stderr, including the optional attribute probes done here, so the reader
//! silences that output once per process and checks attribute existence before
//! fetching values.

use std::sync::Once;

use netcdf::AttributeValue;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Safe to call multiple times; only the first call does anything.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
pub(crate) fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Numeric attribute as f64 values. Scalars yield one element.
pub(crate) fn get_f64s_attr(var: &netcdf::Variable, name: &str) -> Option<Vec<f64>> {
    if !has_attr(var, name) {
        return None;
    }
    let value = var.attribute_value(name)?.ok()?;
    numeric_values(value)
}

/// First value of a numeric attribute.
pub(crate) fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    get_f64s_attr(var, name)?.into_iter().next()
}

/// Helper to get a string attribute.
pub(crate) fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(mut list) if !list.is_empty() => Some(list.swap_remove(0)),
        _ => None,
    }
}

fn numeric_values(value: AttributeValue) -> Option<Vec<f64>> {
    let values = match value {
        AttributeValue::Uchar(v) => vec![v as f64],
        AttributeValue::Schar(v) => vec![v as f64],
        AttributeValue::Ushort(v) => vec![v as f64],
        AttributeValue::Short(v) => vec![v as f64],
        AttributeValue::Uint(v) => vec![v as f64],
        AttributeValue::Int(v) => vec![v as f64],
        AttributeValue::Ulonglong(v) => vec![v as f64],
        AttributeValue::Longlong(v) => vec![v as f64],
        AttributeValue::Float(v) => vec![v as f64],
        AttributeValue::Double(v) => vec![v],
        AttributeValue::Uchars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Schars(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ushorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Shorts(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Uints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ints(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Ulonglongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Longlongs(v) => v.into_iter().map(|x| x as f64).collect(),
        AttributeValue::Floats(v) => v.into_iter().map(f64::from).collect(),
        AttributeValue::Doubles(v) => v,
        _ => return None,
    };
    Some(values)
}
