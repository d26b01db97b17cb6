//! Angular pixel spacing to ground distance.
//!
//! Uses a flat-earth approximation evaluated at the raster's mean latitude:
//! one degree of latitude is taken as 111,320 m everywhere, and one degree
//! of longitude shrinks by `cos(latitude)`. No geodesic correction is
//! applied across the extent, so this is only accurate for areas that are
//! small relative to the Earth's radius.

use demesh_dem::GeoTransform;
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Meters per degree of `(longitude, latitude)` at the given latitude.
pub fn meters_per_degree(lat: f64) -> (f64, f64) {
    (METERS_PER_DEGREE * lat.to_radians().cos(), METERS_PER_DEGREE)
}

/// Ground size of one pixel and of the whole raster, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundResolution {
    /// East-west size of a pixel.
    pub pixel_width_m: f64,
    /// North-south size of a pixel.
    pub pixel_height_m: f64,
    /// East-west size of the raster (`width * pixel_width_m`).
    pub terrain_width_m: f64,
    /// North-south size of the raster (`height * pixel_height_m`).
    pub terrain_height_m: f64,
}

impl GroundResolution {
    /// Compute the ground resolution of a `width x height` raster.
    pub fn from_transform(transform: &GeoTransform, width: usize, height: usize) -> Self {
        let (per_deg_lon, per_deg_lat) = meters_per_degree(transform.bounds.center_lat());
        Self::from_pixel_size(
            transform.pixel_size_x * per_deg_lon,
            transform.pixel_size_y * per_deg_lat,
            width,
            height,
        )
    }

    /// Build from a known pixel size in meters.
    pub fn from_pixel_size(
        pixel_width_m: f64,
        pixel_height_m: f64,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            pixel_width_m,
            pixel_height_m,
            terrain_width_m: width as f64 * pixel_width_m,
            terrain_height_m: height as f64 * pixel_height_m,
        }
    }

    /// The longer of the two terrain extents.
    pub fn max_extent(&self) -> f64 {
        self.terrain_width_m.max(self.terrain_height_m)
    }

    /// Whether the extent can be used as a scale divisor.
    pub fn is_degenerate(&self) -> bool {
        let extent = self.max_extent();
        !(extent.is_finite() && extent > 0.0)
    }
}
