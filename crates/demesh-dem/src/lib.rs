//! # demesh-dem
//!
//! Elevation raster input for the DEM-to-mesh pipeline.
//!
//! This crate provides:
//! - Decoding of single-band GeoTIFF elevation rasters into an
//!   [`ElevationGrid`] plus a [`GeoTransform`] (pixel spacing and bounds)
//! - Fetching rasters from the OpenTopography Global DEM API
//!
//! ## Examples
//!
//! ```no_run
//! use demesh_dem::{load_raster, BoundingBox, OpenTopographyRequest, RasterFetcher};
//!
//! let bounds = BoundingBox::new(45.0, 45.5, 6.0, 6.5)?;
//! let request = OpenTopographyRequest::new(bounds, "my-api-key");
//!
//! let bytes = RasterFetcher::new()?.fetch_opentopography(&request)?;
//! let (grid, transform) = load_raster(&bytes)?;
//! println!(
//!     "{}x{} samples, {:.6} deg/pixel",
//!     grid.width(),
//!     grid.height(),
//!     transform.pixel_size_x
//! );
//! # Ok::<(), demesh_dem::DemError>(())
//! ```

mod error;
mod geo;
mod grid;
mod raster;
mod source;

pub use error::DemError;
pub use geo::{BoundingBox, GeoTransform};
pub use grid::ElevationGrid;
pub use raster::{load_raster, DemRaster};
pub use source::{OpenTopographyRequest, RasterFetcher, DEFAULT_DEM_TYPE};

/// Result type for DEM operations.
pub type Result<T> = std::result::Result<T, DemError>;
