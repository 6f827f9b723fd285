//! Command-line configuration.
//!
//! Every option can also come from the environment (or a `.env` file).

use std::path::PathBuf;
use std::str::FromStr;

use bbox_aggregator::{AggregatorConfig, NormalizationMode};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bbox-aggregate")]
#[command(about = "Sum a gridded variable over a bounding box into a yearly JSON series")]
pub struct Args {
    /// Comma-separated list of NetCDF files
    #[arg(long, env = "BBOX_AGG_INPUT")]
    pub input: String,

    /// Bounding box as "lon_min,lat_min,lon_max,lat_max"
    #[arg(long, env = "BBOX_AGG_BBOX", allow_hyphen_values = true)]
    pub bbox: String,

    /// Variable to aggregate; must exist in every input
    #[arg(long, env = "BBOX_AGG_VAR")]
    pub var: String,

    /// Output JSON path (parent directories are created)
    #[arg(long, env = "BBOX_AGG_OUTPUT")]
    pub output: PathBuf,

    /// Whether each file starts from the given bbox (reset) or the previous
    /// file's normalized bbox (carry)
    #[arg(long, default_value = "reset", env = "BBOX_AGG_NORMALIZATION")]
    pub normalization: NormalizationMode,

    /// Latitude dimension name
    #[arg(long, default_value = "lat", env = "BBOX_AGG_LAT_NAME")]
    pub lat_name: String,

    /// Longitude dimension name
    #[arg(long, default_value = "lon", env = "BBOX_AGG_LON_NAME")]
    pub lon_name: String,

    /// Time dimension name
    #[arg(long, default_value = "time", env = "BBOX_AGG_TIME_NAME")]
    pub time_name: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Log output format
    #[arg(long, default_value = "text", env = "BBOX_AGG_LOG_FORMAT")]
    pub log_format: LogFormat,
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}', expected 'text' or 'json'", other)),
        }
    }
}

impl Args {
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            lat_dim: self.lat_name.clone(),
            lon_dim: self.lon_name.clone(),
            time_dim: self.time_name.clone(),
            normalization: self.normalization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "bbox-aggregate",
        "--input",
        "a_2019_.nc,b_2020_.nc",
        "--bbox",
        "-10,35,30,60",
        "--var",
        "emi_co2",
        "--output",
        "out/series.json",
    ];

    #[test]
    fn test_required_args() {
        let args = Args::try_parse_from(REQUIRED).unwrap();
        assert_eq!(args.input, "a_2019_.nc,b_2020_.nc");
        assert_eq!(args.bbox, "-10,35,30,60");
        assert_eq!(args.output, PathBuf::from("out/series.json"));
        assert_eq!(args.aggregator_config(), AggregatorConfig::default());
    }

    #[test]
    fn test_missing_required_arg() {
        assert!(Args::try_parse_from(REQUIRED[..7].to_vec()).is_err());
    }

    #[test]
    fn test_optional_args() {
        let mut argv = REQUIRED.to_vec();
        argv.extend([
            "--normalization",
            "carry",
            "--lat-name",
            "latitude",
            "--lon-name",
            "longitude",
            "--log-format",
            "json",
        ]);
        let args = Args::try_parse_from(argv).unwrap();
        let config = args.aggregator_config();
        assert_eq!(config.normalization, NormalizationMode::Carry);
        assert_eq!(config.lat_dim, "latitude");
        assert_eq!(config.lon_dim, "longitude");
        assert_eq!(config.time_dim, "time");
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_normalization_rejected() {
        let mut argv = REQUIRED.to_vec();
        argv.extend(["--normalization", "sticky"]);
        assert!(Args::try_parse_from(argv).is_err());
    }
}
