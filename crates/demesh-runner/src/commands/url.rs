//! `demesh url`

use anyhow::Result;
use clap::Args;
use demesh_runner::{opentopography_request, parse_bbox, ConfigOverrides, RunConfig};
use std::path::PathBuf;

#[derive(Args)]
pub struct UrlArgs {
    /// Area: south,north,west,east
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: String,

    /// OpenTopography API key
    #[arg(long, env = "OPENTOPOGRAPHY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenTopography dataset
    #[arg(long)]
    pub dem_type: Option<String>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: UrlArgs) -> Result<()> {
    let mut config = RunConfig::load_or_default(args.config.as_deref())?;
    config.apply(ConfigOverrides {
        api_key: args.api_key,
        dem_type: args.dem_type,
        ..Default::default()
    });

    let request = opentopography_request(parse_bbox(&args.bbox)?, &config)?;
    println!("{}", request.url());
    Ok(())
}
