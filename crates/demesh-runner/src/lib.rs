//! # demesh-runner
//!
//! Orchestration around the conversion engine: configuration loading,
//! raster input (file, URL or OpenTopography bounding box), conversion,
//! export to disk and logging of the conversion figures.
//!
//! The `demesh` binary is a thin clap front end over [`pipeline::run`].

pub mod config;
mod error;
pub mod pipeline;

pub use config::{parse_bbox, ConfigOverrides, OpenTopographyConfig, RunConfig};
pub use error::{Result, RunnerError};
pub use pipeline::{
    build_mesh, describe_raster, load_input, opentopography_request, run, write_mesh_file,
    ConversionOutput, RasterInfo, RasterInput,
};
