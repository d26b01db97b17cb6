//! Grid to vertices and triangles.
//!
//! Rows are independent, so vertices, colors and faces are all filled in
//! parallel one grid row at a time. Output order is the same as a
//! sequential row-major pass.

use crate::color::{terrain_color, Rgba};
use crate::mesh::MeshScale;
use crate::metric::GroundResolution;
use crate::normalize::ElevationStats;
use demesh_dem::ElevationGrid;
use rayon::prelude::*;

/// Scene positions and colors for every grid cell, row-major.
///
/// `x` grows with the column and `y` with the row (southward); `z` is the
/// height above the lowest valid sample.
pub fn build_vertices(
    grid: &ElevationGrid,
    resolution: &GroundResolution,
    stats: &ElevationStats,
    scale: &MeshScale,
) -> (Vec<[f32; 3]>, Vec<Rgba>) {
    let width = grid.width();
    let count = grid.len();
    let mut positions = vec![[0.0f32; 3]; count];
    let mut colors = vec![[0u8; 4]; count];

    if count == 0 {
        return (positions, colors);
    }

    positions
        .par_chunks_mut(width)
        .zip(colors.par_chunks_mut(width))
        .zip(grid.samples().par_chunks(width))
        .enumerate()
        .for_each(|(row, ((pos_row, color_row), elevations))| {
            let y = row as f64 * resolution.pixel_height_m * scale.xy;
            for (col, &elevation) in elevations.iter().enumerate() {
                let x = col as f64 * resolution.pixel_width_m * scale.xy;
                let z = (elevation as f64 - stats.min) * scale.z;
                pos_row[col] = [x as f32, y as f32, z as f32];
                color_row[col] = terrain_color(stats.normalized(elevation));
            }
        });

    (positions, colors)
}

/// Triangulate a `width x height` vertex grid.
///
/// Each 2x2 block of cells becomes two triangles, counter-clockwise in
/// raster orientation (north up), split along the top-right/bottom-left
/// diagonal:
/// `(top_left, bottom_left, top_right)` and
/// `(top_right, bottom_left, bottom_right)`.
///
/// Grids narrower or shorter than 2 produce no faces. Callers must ensure
/// `width * height` fits in `u32`.
pub fn triangulate(width: usize, height: usize) -> Vec<[u32; 3]> {
    if width < 2 || height < 2 {
        return Vec::new();
    }

    let per_row = 2 * (width - 1);
    let mut faces = vec![[0u32; 3]; per_row * (height - 1)];

    faces
        .par_chunks_mut(per_row)
        .enumerate()
        .for_each(|(row, row_faces)| {
            for col in 0..width - 1 {
                let top_left = (row * width + col) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((row + 1) * width + col) as u32;
                let bottom_right = bottom_left + 1;

                row_faces[2 * col] = [top_left, bottom_left, top_right];
                row_faces[2 * col + 1] = [top_right, bottom_left, bottom_right];
            }
        });

    faces
}
