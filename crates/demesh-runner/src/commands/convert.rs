//! `demesh convert`

use anyhow::{Context, Result};
use clap::Args;
use demesh_runner::{parse_bbox, run, ConfigOverrides, RasterInput, RunConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["input", "url", "bbox"]),
))]
pub struct ConvertArgs {
    /// GeoTIFF file to convert
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// URL of a GeoTIFF to download
    #[arg(long)]
    pub url: Option<String>,

    /// Area to fetch from OpenTopography: south,north,west,east
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,

    /// Output format: glb, gltf, stl or obj
    #[arg(short, long)]
    pub format: Option<String>,

    /// Vertical exaggeration
    #[arg(short, long)]
    pub exaggeration: Option<f64>,

    /// Longer side of the model in scene units
    #[arg(long)]
    pub target_size: Option<f64>,

    /// Missing-data sentinel
    #[arg(long, allow_hyphen_values = true)]
    pub no_data: Option<f32>,

    /// Output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// OpenTopography API key
    #[arg(long, env = "OPENTOPOGRAPHY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenTopography dataset (SRTMGL3, SRTMGL1, COP30, ...)
    #[arg(long)]
    pub dem_type: Option<String>,
}

pub fn execute(args: ConvertArgs) -> Result<()> {
    let mut config = RunConfig::load_or_default(args.config.as_deref())?;
    config.apply(ConfigOverrides {
        exaggeration: args.exaggeration,
        target_size: args.target_size,
        no_data: args.no_data,
        format: args.format,
        output: args.output,
        api_key: args.api_key,
        dem_type: args.dem_type,
    });

    let input = match (args.input, args.url, args.bbox) {
        (Some(path), _, _) => RasterInput::File(path),
        (_, Some(url), _) => RasterInput::Url(url),
        (_, _, Some(bbox)) => RasterInput::Bbox(parse_bbox(&bbox)?),
        (None, None, None) => anyhow::bail!("one of --input, --url or --bbox is required"),
    };

    let output = run(&input, &config).with_context(|| format!("Conversion of {input} failed"))?;
    info!(
        "Done: {} ({} vertices, {} faces)",
        output.path.display(),
        output.vertex_count,
        output.face_count
    );
    Ok(())
}
