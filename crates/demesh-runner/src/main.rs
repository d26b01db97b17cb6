//! `demesh`: convert elevation rasters into 3D terrain models.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// DEM to 3D mesh converter
#[derive(Parser)]
#[command(name = "demesh")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert GeoTIFF elevation rasters into 3D terrain models", long_about = None)]
struct Cli {
    /// Default log level (trace, debug, info, warn, error); RUST_LOG overrides it
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raster into a mesh file
    Convert(commands::convert::ConvertArgs),
    /// Describe a raster
    Info(commands::info::InfoArgs),
    /// Print the OpenTopography request URL for an area
    Url(commands::url::UrlArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Convert(args) => commands::convert::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Url(args) => commands::url::execute(args),
    }
}
