//! Error types for mesh export.

use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while encoding or reading a mesh file.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("glTF document encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The encoded output would not fit the 32-bit length fields of the
    /// container format.
    #[error("Encoded mesh is too large for the container: {bytes} bytes")]
    BufferTooLarge { bytes: usize },

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("OBJ parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
