//! `demesh info`

use anyhow::{Context, Result};
use clap::Args;
use demesh_dem::DemRaster;
use demesh_runner::pipeline::log_raster_info;
use demesh_runner::{describe_raster, RunConfig};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// GeoTIFF file to describe
    #[arg(short, long)]
    pub input: PathBuf,

    /// Missing-data sentinel (defaults to the raster's NODATA tag)
    #[arg(long, allow_hyphen_values = true)]
    pub no_data: Option<f32>,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let raster = DemRaster::from_file(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let config = RunConfig {
        no_data: args.no_data,
        ..Default::default()
    };
    log_raster_info(&describe_raster(&raster, &config));
    Ok(())
}
