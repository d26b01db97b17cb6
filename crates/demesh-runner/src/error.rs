//! Error types for the runner.

use demesh_dem::DemError;
use demesh_export::{ExportError, ExportFormat};
use demesh_mesh::MeshError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors that can occur while running a conversion.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Invalid bounding box '{input}': {reason}")]
    InvalidBbox { input: String, reason: String },

    #[error("An OpenTopography API key is required to fetch a bounding box")]
    MissingApiKey,

    #[error("Raster error: {0}")]
    Dem(#[from] DemError),

    #[error("Mesh generation failed: {0}")]
    Mesh(#[from] MeshError),

    #[error("Failed to export {width}x{height} mesh as {format}: {source}")]
    Export {
        format: ExportFormat,
        width: usize,
        height: usize,
        source: ExportError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
