//! Error types for mesh generation.

use thiserror::Error;

/// Result type for mesh generation.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur when converting a grid into a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The grid has no rows or no columns.
    #[error("Invalid grid dimensions {width}x{height} (need at least 1x1)")]
    InvalidGrid {
        /// Grid width in samples.
        width: usize,
        /// Grid height in samples.
        height: usize,
    },

    /// The grid has more vertices than 32-bit face indices can address.
    #[error("Grid has {count} vertices, more than 32-bit indices can address")]
    TooManyVertices {
        /// Number of vertices the grid would produce.
        count: usize,
    },
}
