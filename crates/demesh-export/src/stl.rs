//! Binary STL writer.
//!
//! 80-byte header, little-endian `u32` triangle count, then 50 bytes per
//! triangle: normal, three vertices, and a zero attribute word.

use crate::{ExportError, Result};
use demesh_mesh::TerrainMesh;
use std::io::Write;

const HEADER_LEN: usize = 80;
const HEADER_TAG: &[u8] = b"demesh terrain";

/// Size in bytes of a binary STL holding `faces` triangles.
pub fn stl_size(faces: usize) -> usize {
    HEADER_LEN + 4 + faces * 50
}

/// Unit normal of triangle `(a, b, c)`; zero for degenerate triangles.
pub fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > 0.0 {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0; 3]
    }
}

/// Write the mesh as binary STL. Vertex colors are not stored.
pub fn write_stl<W: Write>(writer: &mut W, mesh: &TerrainMesh) -> Result<()> {
    let tri_count = u32::try_from(mesh.face_count()).map_err(|_| ExportError::BufferTooLarge {
        bytes: stl_size(mesh.face_count()),
    })?;

    let mut header = [0u8; HEADER_LEN];
    header[..HEADER_TAG.len()].copy_from_slice(HEADER_TAG);
    writer.write_all(&header)?;
    writer.write_all(&tri_count.to_le_bytes())?;

    let mut record = [0u8; 50];
    for &[i, j, k] in &mesh.faces {
        let a = mesh.positions[i as usize];
        let b = mesh.positions[j as usize];
        let c = mesh.positions[k as usize];
        let n = face_normal(a, b, c);

        for (slot, value) in [n, a, b, c].iter().flatten().enumerate() {
            record[slot * 4..slot * 4 + 4].copy_from_slice(&value.to_le_bytes());
        }
        // Attribute byte count stays zero
        writer.write_all(&record)?;
    }

    Ok(())
}
