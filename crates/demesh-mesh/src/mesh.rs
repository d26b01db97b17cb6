//! The assembled terrain mesh.

use crate::color::Rgba;
use crate::metric::GroundResolution;
use crate::normalize::ElevationStats;
use serde::{Deserialize, Serialize};

/// Real-world meters to scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshScale {
    /// Horizontal scale, shared by X and Y.
    pub xy: f64,
    /// Vertical scale: `xy * exaggeration`.
    pub z: f64,
}

impl MeshScale {
    /// Fit the longer terrain extent to `target_size` scene units.
    ///
    /// `resolution` must not be degenerate.
    pub fn fit(resolution: &GroundResolution, target_size: f64, exaggeration: f64) -> Self {
        let xy = target_size / resolution.max_extent();
        Self {
            xy,
            z: xy * exaggeration,
        }
    }
}

/// Axis-aligned bounds of the vertex positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VertexBounds {
    /// Per-axis minimum.
    pub min: [f32; 3],
    /// Per-axis maximum.
    pub max: [f32; 3],
}

impl VertexBounds {
    /// Bounds of a set of positions, or `None` when empty.
    pub fn of(positions: &[[f32; 3]]) -> Option<Self> {
        let first = *positions.first()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in &positions[1..] {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }

    /// Per-axis size.
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}

/// Figures describing one conversion, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    /// Grid width in samples.
    pub width: usize,
    /// Grid height in samples.
    pub height: usize,
    /// Ground resolution the mesh was built with.
    pub resolution: GroundResolution,
    /// Set when the raster's pixel size was unusable and unit spacing was
    /// substituted.
    pub unit_spacing: bool,
    /// Elevation statistics after no-data cleanup.
    pub stats: ElevationStats,
    /// Scene scale.
    pub scale: MeshScale,
    /// Vertical exaggeration applied on top of the true-proportion scale.
    pub exaggeration: f64,
    /// Terrain width in scene units.
    pub model_width: f64,
    /// Terrain depth (north-south) in scene units.
    pub model_height: f64,
    /// Relief in scene units.
    pub model_relief: f64,
    /// Vertex bounds.
    pub bounds: VertexBounds,
}

impl MeshSummary {
    /// Relief as a percentage of model width.
    pub fn relief_ratio_percent(&self) -> f64 {
        if self.model_width > 0.0 {
            self.model_relief / self.model_width * 100.0
        } else {
            0.0
        }
    }
}

/// Vertex-colored triangle mesh built from an elevation grid.
///
/// Vertex `row * width + col` corresponds to grid cell `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    /// Scene-space vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// One color per vertex.
    pub colors: Vec<Rgba>,
    /// Triangles as vertex index triples.
    pub faces: Vec<[u32; 3]>,
    /// Conversion diagnostics.
    pub summary: MeshSummary,
}

impl TerrainMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Grid dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.summary.width, self.summary.height)
    }

    /// Scene scale.
    pub fn scale(&self) -> MeshScale {
        self.summary.scale
    }

    /// Vertex index of grid cell `(row, col)`.
    pub fn vertex_index(&self, row: usize, col: usize) -> usize {
        row * self.summary.width + col
    }

    /// Position of grid cell `(row, col)`.
    pub fn position(&self, row: usize, col: usize) -> [f32; 3] {
        self.positions[self.vertex_index(row, col)]
    }

    /// Flat face index list, three entries per triangle.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.faces.iter().flatten().copied()
    }
}
