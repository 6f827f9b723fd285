//! Aggregation configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the working bbox moves from one input source to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Every source starts from the bbox the caller supplied.
    #[default]
    Reset,
    /// Each source starts from the previous source's normalized bbox.
    Carry,
}

impl FromStr for NormalizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reset" => Ok(NormalizationMode::Reset),
            "carry" => Ok(NormalizationMode::Carry),
            other => Err(format!(
                "unknown normalization mode '{}', expected 'reset' or 'carry'",
                other
            )),
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationMode::Reset => f.write_str("reset"),
            NormalizationMode::Carry => f.write_str("carry"),
        }
    }
}

/// Dimension names and bbox handling for an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Latitude dimension / coordinate name
    pub lat_dim: String,
    /// Longitude dimension / coordinate name
    pub lon_dim: String,
    /// Time dimension / coordinate name
    pub time_dim: String,
    pub normalization: NormalizationMode,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            lat_dim: "lat".to_string(),
            lon_dim: "lon".to_string(),
            time_dim: "time".to_string(),
            normalization: NormalizationMode::Reset,
        }
    }
}
