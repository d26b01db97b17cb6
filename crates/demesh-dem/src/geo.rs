//! Geographic referencing of a raster.

use crate::{DemError, Result};
use serde::{Deserialize, Serialize};

/// Geographic bounds of a raster in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude (south edge).
    pub south: f64,
    /// Maximum latitude (north edge).
    pub north: f64,
    /// Minimum longitude (west edge).
    pub west: f64,
    /// Maximum longitude (east edge).
    pub east: f64,
}

impl BoundingBox {
    /// Create bounds, rejecting edges that are out of order or not finite.
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Result<Self> {
        let finite = [south, north, west, east].iter().all(|v| v.is_finite());
        if !finite || south >= north || west >= east {
            return Err(DemError::InvalidBounds {
                south,
                north,
                west,
                east,
            });
        }
        Ok(Self {
            south,
            north,
            west,
            east,
        })
    }

    /// Derive bounds from a polygon ring of `[lon, lat]` positions.
    ///
    /// The ring may be closed (last position repeating the first) or open.
    pub fn from_ring(ring: &[[f64; 2]]) -> Result<Self> {
        let mut south = f64::INFINITY;
        let mut north = f64::NEG_INFINITY;
        let mut west = f64::INFINITY;
        let mut east = f64::NEG_INFINITY;
        for &[lon, lat] in ring {
            south = south.min(lat);
            north = north.max(lat);
            west = west.min(lon);
            east = east.max(lon);
        }
        Self::new(south, north, west, east)
    }

    /// Mean latitude of the box.
    pub fn center_lat(&self) -> f64 {
        (self.south + self.north) / 2.0
    }
}

/// Pixel spacing and extent of a north-up raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    /// Degrees of longitude per pixel (always non-negative).
    pub pixel_size_x: f64,
    /// Degrees of latitude per pixel (always non-negative).
    pub pixel_size_y: f64,
    /// Geographic bounds.
    pub bounds: BoundingBox,
}

impl GeoTransform {
    /// Create a transform. Pixel sizes are stored as magnitudes.
    pub fn new(pixel_size_x: f64, pixel_size_y: f64, bounds: BoundingBox) -> Self {
        Self {
            pixel_size_x: pixel_size_x.abs(),
            pixel_size_y: pixel_size_y.abs(),
            bounds,
        }
    }

    /// Build a transform from the raster's north-west corner and its size.
    ///
    /// A zero pixel size is accepted and yields bounds of zero extent on
    /// that axis; only non-finite values are rejected.
    pub fn from_origin(
        west: f64,
        north: f64,
        pixel_size_x: f64,
        pixel_size_y: f64,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let pixel_size_x = pixel_size_x.abs();
        let pixel_size_y = pixel_size_y.abs();
        let bounds = BoundingBox {
            south: north - height as f64 * pixel_size_y,
            north,
            west,
            east: west + width as f64 * pixel_size_x,
        };

        let edges = [bounds.south, bounds.north, bounds.west, bounds.east];
        if !edges.iter().all(|v| v.is_finite()) {
            return Err(DemError::InvalidBounds {
                south: bounds.south,
                north: bounds.north,
                west: bounds.west,
                east: bounds.east,
            });
        }
        Ok(Self::new(pixel_size_x, pixel_size_y, bounds))
    }
}
