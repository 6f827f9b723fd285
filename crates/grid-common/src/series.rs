//! Time-series points produced by aggregation.

use serde::{Deserialize, Serialize};

/// One aggregated value labeled with its period (a 4-digit year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    #[serde(rename = "date")]
    pub period: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(period: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            value,
        }
    }
}

/// Concatenate per-source series and sort by period.
///
/// Periods compare as strings. Points sharing a period are all kept, in input
/// order.
pub fn merge_series<I>(sources: I) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = Vec<SeriesPoint>>,
{
    let mut merged: Vec<SeriesPoint> = sources.into_iter().flatten().collect();
    merged.sort_by(|a, b| a.period.cmp(&b.period));
    merged
}

/// Render a series as a pretty-printed JSON array with a trailing newline.
///
/// Non-finite values (a NaN sum from mixed infinities, or an infinity) have no
/// JSON representation and are written as `null`.
pub fn to_json_document(points: &[SeriesPoint]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(points)?;
    json.push('\n');
    Ok(json)
}
