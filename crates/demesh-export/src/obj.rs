//! Wavefront OBJ writer and a minimal reader.
//!
//! Only `v` and `f` records are produced. The reader accepts what common
//! tools emit for plain meshes: `v`, `f` with `v/vt/vn` tokens, negative
//! (relative) indices and polygon faces, which are fan-triangulated.
//! Everything else is skipped.

use crate::{ExportError, Result};
use demesh_mesh::TerrainMesh;
use std::io::Write;

/// Geometry read back from an OBJ file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjMesh {
    /// Vertex positions in file order.
    pub positions: Vec<[f32; 3]>,
    /// Zero-based triangle indices.
    pub faces: Vec<[u32; 3]>,
}

/// Write the mesh as OBJ text. Vertex colors are not stored.
pub fn write_obj<W: Write>(writer: &mut W, mesh: &TerrainMesh) -> Result<()> {
    let (width, height) = mesh.dimensions();
    writeln!(writer, "# demesh terrain {width}x{height}")?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    )?;
    writeln!(writer, "o terrain")?;

    for [x, y, z] in &mesh.positions {
        writeln!(writer, "v {x} {y} {z}")?;
    }
    for [a, b, c] in &mesh.faces {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

fn parse_error(line: usize, message: impl Into<String>) -> ExportError {
    ExportError::Parse {
        line,
        message: message.into(),
    }
}

/// Resolve one face token (`7`, `7/1`, `7//3`, `-1`) to a zero-based index.
fn vertex_index(token: &str, vertex_count: usize, line: usize) -> Result<u32> {
    let raw = token.split('/').next().unwrap_or("");
    let idx: i64 = raw
        .parse()
        .map_err(|_| parse_error(line, format!("bad face index '{token}'")))?;

    let resolved = match idx {
        0 => return Err(parse_error(line, "face index 0")),
        i if i > 0 => i - 1,
        i => vertex_count as i64 + i,
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(parse_error(
            line,
            format!("face index {idx} out of range for {vertex_count} vertices"),
        ));
    }
    u32::try_from(resolved).map_err(|_| parse_error(line, format!("face index {idx} too large")))
}

/// Parse `v` and `f` records from OBJ text.
pub fn parse_obj(text: &str) -> Result<ObjMesh> {
    let mut mesh = ObjMesh::default();

    for (n, line) in text.lines().enumerate() {
        let line_no = n + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let mut p = [0.0f32; 3];
                for c in &mut p {
                    let token = tokens
                        .next()
                        .ok_or_else(|| parse_error(line_no, "vertex needs three coordinates"))?;
                    *c = token
                        .parse()
                        .map_err(|_| parse_error(line_no, format!("bad coordinate '{token}'")))?;
                }
                mesh.positions.push(p);
            }
            Some("f") => {
                let corners = tokens
                    .map(|t| vertex_index(t, mesh.positions.len(), line_no))
                    .collect::<Result<Vec<_>>>()?;
                if corners.len() < 3 {
                    return Err(parse_error(line_no, "face needs at least three vertices"));
                }
                for k in 1..corners.len() - 1 {
                    mesh.faces.push([corners[0], corners[k], corners[k + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}
