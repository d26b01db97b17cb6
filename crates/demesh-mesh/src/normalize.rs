//! No-data cleanup and elevation range.

use demesh_dem::ElevationGrid;
use serde::{Deserialize, Serialize};

/// No-data value used by SRTM and most DEM exports.
pub const DEFAULT_NO_DATA: f32 = -32768.0;

/// Elevation extremes over the valid samples of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationStats {
    /// Lowest valid elevation (0 when no sample is valid).
    pub min: f64,
    /// Highest valid elevation (0 when no sample is valid).
    pub max: f64,
    /// Normalization divisor. `max - min`, or 1 when that would be zero.
    pub range: f64,
    /// Number of samples that were no-data or NaN.
    pub missing: usize,
}

impl ElevationStats {
    /// Elevation mapped to `[0, 1]` over the valid range.
    pub fn normalized(&self, elevation: f32) -> f64 {
        (elevation as f64 - self.min) / self.range
    }

    /// True elevation span, zero for flat terrain.
    pub fn relief(&self) -> f64 {
        self.max - self.min
    }
}

fn is_missing(value: f32, no_data: f32) -> bool {
    value.is_nan() || value == no_data
}

/// Compute min/max over valid samples without modifying the grid.
pub fn elevation_stats(grid: &ElevationGrid, no_data: f32) -> ElevationStats {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut missing = 0;

    for &value in grid.samples() {
        if is_missing(value, no_data) {
            missing += 1;
        } else {
            min = min.min(value);
            max = max.max(value);
        }
    }

    let (min, max) = if missing == grid.len() {
        (0.0, 0.0)
    } else {
        (min as f64, max as f64)
    };

    let range = max - min;
    let range = if range == 0.0 { 1.0 } else { range };

    ElevationStats {
        min,
        max,
        range,
        missing,
    }
}

/// Replace no-data and NaN samples with the valid minimum and return the
/// elevation statistics.
///
/// After this call every sample is a definite elevation, so a grid that was
/// entirely no-data becomes a flat grid at 0.
pub fn normalize(grid: &mut ElevationGrid, no_data: f32) -> ElevationStats {
    let stats = elevation_stats(grid, no_data);
    if stats.missing > 0 {
        let fill = stats.min as f32;
        for value in grid.samples_mut() {
            if is_missing(*value, no_data) {
                *value = fill;
            }
        }
    }
    stats
}
