//! Temporal labeling of reduced values.

use std::path::Path;

use grid_common::SeriesPoint;

use crate::error::{AggregationError, Result};
use crate::reduce::Reduction;

/// First `_`-separated token of the file name that is exactly four ASCII digits.
///
/// The extension stays attached to the last token, so `data_2021.nc` has no
/// year token while `data_2021_v2.nc` does.
pub fn year_from_filename(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.split('_')
        .find(|token| token.len() == 4 && token.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
}

/// Turn a reduction into series points for the source at `path`.
pub fn label_reduction(reduction: Reduction, path: &Path) -> Result<Vec<SeriesPoint>> {
    match reduction {
        Reduction::PerTime { axis, sums } => {
            let labels = axis.year_labels().map_err(|e| AggregationError::InvalidTime {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            Ok(labels
                .into_iter()
                .zip(sums)
                .map(|(period, value)| SeriesPoint::new(period, value))
                .collect())
        }
        Reduction::Scalar(value) => {
            let year = year_from_filename(path)
                .ok_or_else(|| AggregationError::MissingYear(path.display().to_string()))?;
            Ok(vec![SeriesPoint::new(year, value)])
        }
    }
}
