//! # demesh-mesh
//!
//! Conversion of a georeferenced elevation grid into a true-to-scale,
//! vertex-colored triangle mesh.
//!
//! The pipeline is:
//! 1. [`GroundResolution`]: angular pixel size to meters at the mean latitude
//! 2. [`normalize`]: no-data cleanup and elevation range
//! 3. [`build_vertices`] / [`triangulate`]: scene-space vertices, colors
//!    from [`terrain_color`], and the regular-grid triangle list
//!
//! [`convert`] runs all of it.
//!
//! ## Example
//!
//! ```
//! use demesh_dem::{BoundingBox, ElevationGrid, GeoTransform};
//! use demesh_mesh::{convert, MeshOptions};
//!
//! let grid = ElevationGrid::from_rows(&[[0.0f32, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 0.0]])?;
//! let bounds = BoundingBox::new(45.0, 45.003, 6.0, 6.003)?;
//! let transform = GeoTransform::new(0.001, -0.001, bounds);
//!
//! let mesh = convert(grid, &transform, &MeshOptions::with_exaggeration(1.0))?;
//! assert_eq!(mesh.vertex_count(), 9);
//! assert_eq!(mesh.face_count(), 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod color;
mod convert;
mod error;
mod mesh;
mod metric;
mod normalize;

pub use builder::{build_vertices, triangulate};
pub use color::{terrain_color, Rgba, FOOTHILL_LIMIT, LOWLAND_LIMIT, SNOW_LINE};
pub use convert::{convert, MeshOptions, DEFAULT_EXAGGERATION, DEFAULT_TARGET_SIZE};
pub use error::{MeshError, MeshResult};
pub use mesh::{MeshScale, MeshSummary, TerrainMesh, VertexBounds};
pub use metric::{meters_per_degree, GroundResolution, METERS_PER_DEGREE};
pub use normalize::{elevation_stats, normalize, ElevationStats, DEFAULT_NO_DATA};
