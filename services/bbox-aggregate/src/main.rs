//! Bounding-box aggregation CLI.
//!
//! Sums a variable from one or more NetCDF files over a lon/lat box and
//! writes the yearly series as a JSON array.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use bbox_aggregator::{AggregationRequest, Aggregator};
use config::{Args, LogFormat};
use netcdf_parser::NetCdfLoader;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let request = AggregationRequest::from_args(&args.input, &args.bbox, &args.var)?;
    let aggregator = Aggregator::new(NetCdfLoader, args.aggregator_config());

    let series = aggregator
        .run(&request)
        .with_context(|| format!("Failed to aggregate '{}'", request.variable))?;

    output::write_series(&args.output, &series)?;
    info!(rows = series.len(), path = %args.output.display(), "Finished");

    println!("Wrote {} rows to {}", series.len(), args.output.display());
    Ok(())
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    match args.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
