//! # demesh-export
//!
//! Encodes a [`TerrainMesh`] into a downloadable 3D file.
//!
//! | format | colors | notes |
//! |--------|--------|-------|
//! | [`ExportFormat::Glb`]  | yes | binary glTF 2.0, the default |
//! | [`ExportFormat::Gltf`] | yes | glTF JSON with an embedded base64 buffer |
//! | [`ExportFormat::Stl`]  | no  | binary STL with face normals |
//! | [`ExportFormat::Obj`]  | no  | `v`/`f` records only |
//!
//! All formats store the vertex positions exactly as built; no axis
//! conversion or recentering is applied.
//!
//! ## Example
//!
//! ```no_run
//! use demesh_export::{export_mesh, ExportFormat};
//! # fn run(mesh: &demesh_mesh::TerrainMesh) -> demesh_export::Result<()> {
//! let format = ExportFormat::from_name_or_default("stl");
//! let bytes = export_mesh(mesh, format)?;
//! std::fs::write(format.file_name(), bytes)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod format;
mod gltf;
mod obj;
mod stl;

pub use error::{ExportError, Result};
pub use format::{ExportFormat, OUTPUT_STEM};
pub use gltf::{write_glb, write_gltf, CHUNK_BIN, CHUNK_JSON, GLB_MAGIC};
pub use obj::{parse_obj, write_obj, ObjMesh};
pub use stl::{face_normal, stl_size, write_stl};

use demesh_mesh::TerrainMesh;
use std::io::Write;

/// Write `mesh` in `format` to any writer.
pub fn write_mesh<W: Write>(writer: &mut W, mesh: &TerrainMesh, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Glb => write_glb(writer, mesh),
        ExportFormat::Gltf => write_gltf(writer, mesh),
        ExportFormat::Stl => write_stl(writer, mesh),
        ExportFormat::Obj => write_obj(writer, mesh),
    }
}

/// Encode `mesh` in `format` into memory.
pub fn export_mesh(mesh: &TerrainMesh, format: ExportFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_mesh(&mut bytes, mesh, format)?;
    Ok(bytes)
}
