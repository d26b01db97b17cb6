//! Error types for the DEM crate.

use thiserror::Error;

/// Errors that can occur when loading or fetching elevation rasters.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error.
    #[error("TIFF decode error: {0}")]
    TiffDecode(#[from] tiff::TiffError),

    /// Invalid GeoTIFF - missing or malformed georeferencing tags.
    #[error("Invalid GeoTIFF: {0}")]
    InvalidGeoTiff(String),

    /// Unsupported data type in the TIFF file.
    #[error("Unsupported TIFF data type: {0}")]
    UnsupportedDataType(String),

    /// The raster carries more than one sample per pixel.
    #[error("Expected a single-band raster, found {samples} samples per pixel")]
    MultiBand {
        /// Samples per pixel reported by the file.
        samples: u16,
    },

    /// Sample buffer length does not match the grid dimensions.
    #[error("Grid of {width}x{height} does not match {len} samples")]
    GridSizeMismatch {
        /// Grid width in samples.
        width: usize,
        /// Grid height in samples.
        height: usize,
        /// Number of samples supplied.
        len: usize,
    },

    /// Rows of unequal length were supplied to a grid constructor.
    #[error("Row {row} has {found} samples, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// Bounding box edges are out of order or not finite.
    #[error("Invalid bounds: south={south} north={north} west={west} east={east}")]
    InvalidBounds {
        /// South edge latitude.
        south: f64,
        /// North edge latitude.
        north: f64,
        /// West edge longitude.
        west: f64,
        /// East edge longitude.
        east: f64,
    },

    /// HTTP request error when fetching rasters.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Remote server refused or failed the raster request.
    #[error("Failed to download raster from {url}: {reason}")]
    DownloadFailed {
        /// Requested URL.
        url: String,
        /// Reason for failure.
        reason: String,
    },
}
