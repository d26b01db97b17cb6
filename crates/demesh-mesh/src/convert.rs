//! DEM to mesh conversion entry point.

use crate::builder::{build_vertices, triangulate};
use crate::error::{MeshError, MeshResult};
use crate::mesh::{MeshScale, MeshSummary, TerrainMesh, VertexBounds};
use crate::metric::GroundResolution;
use crate::normalize::{normalize, DEFAULT_NO_DATA};
use demesh_dem::{ElevationGrid, GeoTransform};
use serde::{Deserialize, Serialize};

/// Default vertical exaggeration.
pub const DEFAULT_EXAGGERATION: f64 = 3.0;

/// Default size of the longer horizontal side, in scene units.
pub const DEFAULT_TARGET_SIZE: f64 = 100.0;

/// Conversion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Vertical scale multiplier. 1.0 keeps true proportions.
    pub exaggeration: f64,
    /// Sample value marking missing elevation.
    pub no_data: f32,
    /// Scene size of the longer horizontal terrain side.
    pub target_size: f64,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            exaggeration: DEFAULT_EXAGGERATION,
            no_data: DEFAULT_NO_DATA,
            target_size: DEFAULT_TARGET_SIZE,
        }
    }
}

impl MeshOptions {
    /// Options with the given exaggeration and default everything else.
    pub fn with_exaggeration(exaggeration: f64) -> Self {
        Self {
            exaggeration,
            ..Self::default()
        }
    }
}

/// Convert an elevation grid into a vertex-colored, true-to-scale mesh.
///
/// The horizontal scale maps the longer terrain side to
/// `options.target_size` scene units and is shared by both axes. The
/// vertical scale starts from the same factor and is multiplied by
/// `options.exaggeration`.
///
/// Fails only for grids without rows or columns, or grids too large for
/// 32-bit indices.
pub fn convert(
    mut grid: ElevationGrid,
    transform: &GeoTransform,
    options: &MeshOptions,
) -> MeshResult<TerrainMesh> {
    let (width, height) = grid.dimensions();
    if width < 1 || height < 1 {
        return Err(MeshError::InvalidGrid { width, height });
    }
    let count = grid.len();
    if u32::try_from(count - 1).is_err() {
        return Err(MeshError::TooManyVertices { count });
    }

    let mut resolution = GroundResolution::from_transform(transform, width, height);
    let unit_spacing = resolution.is_degenerate();
    if unit_spacing {
        resolution = GroundResolution::from_pixel_size(1.0, 1.0, width, height);
    }

    let stats = normalize(&mut grid, options.no_data);
    let scale = MeshScale::fit(&resolution, options.target_size, options.exaggeration);

    let (positions, colors) = build_vertices(&grid, &resolution, &stats, &scale);
    let faces = triangulate(width, height);

    let summary = MeshSummary {
        width,
        height,
        resolution,
        unit_spacing,
        stats,
        scale,
        exaggeration: options.exaggeration,
        model_width: resolution.terrain_width_m * scale.xy,
        model_height: resolution.terrain_height_m * scale.xy,
        model_relief: stats.relief() * scale.z,
        bounds: VertexBounds::of(&positions).unwrap_or_default(),
    };

    Ok(TerrainMesh {
        positions,
        colors,
        faces,
        summary,
    })
}
