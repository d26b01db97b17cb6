//! glTF 2.0 encoding.
//!
//! The mesh is stored as a single buffer holding three tightly packed
//! sections, in order: positions (`f32` x3), colors (`u8` x4, normalized)
//! and triangle indices (`u32`). Every section length is a multiple of
//! four, so no inner padding is needed.
//!
//! Reference: https://registry.khronos.org/glTF/specs/2.0/glTF-2.0.html

use crate::{ExportError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use demesh_mesh::{TerrainMesh, VertexBounds};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// `"glTF"` in little-endian.
pub const GLB_MAGIC: u32 = 0x4654_6C67;
/// `"JSON"` chunk type.
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// `"BIN\0"` chunk type.
pub const CHUNK_BIN: u32 = 0x004E_4942;

const GLB_VERSION: u32 = 2;
const GLB_HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

const UNSIGNED_BYTE: u32 = 5121;
const UNSIGNED_INT: u32 = 5125;
const FLOAT: u32 = 5126;

const MODE_POINTS: u32 = 0;
const MODE_TRIANGLES: u32 = 4;

// ============================================================================
// Document model
// ============================================================================

#[derive(Debug, Serialize)]
struct Document {
    asset: Asset,
    scene: usize,
    scenes: Vec<Scene>,
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
    accessors: Vec<Accessor>,
    #[serde(rename = "bufferViews")]
    buffer_views: Vec<BufferView>,
    buffers: Vec<Buffer>,
}

#[derive(Debug, Serialize)]
struct Asset {
    version: &'static str,
    generator: &'static str,
}

#[derive(Debug, Serialize)]
struct Scene {
    nodes: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct Node {
    name: &'static str,
    mesh: usize,
}

#[derive(Debug, Serialize)]
struct Mesh {
    name: &'static str,
    primitives: Vec<Primitive>,
}

#[derive(Debug, Serialize)]
struct Primitive {
    attributes: BTreeMap<&'static str, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indices: Option<usize>,
    mode: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: usize,
    component_type: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    normalized: bool,
    count: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<[f32; 3]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    buffer: usize,
    byte_offset: usize,
    byte_length: usize,
    target: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Buffer {
    byte_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
}

// ============================================================================
// Buffer packing
// ============================================================================

/// Binary payload plus the document describing it.
struct Packed {
    document: Document,
    bin: Vec<u8>,
}

fn pack(mesh: &TerrainMesh) -> Packed {
    let vertex_count = mesh.vertex_count();
    let index_count = mesh.face_count() * 3;

    let positions_len = vertex_count * 12;
    let colors_len = vertex_count * 4;
    let indices_len = index_count * 4;

    let mut bin = Vec::with_capacity(positions_len + colors_len + indices_len);
    for p in &mesh.positions {
        for c in p {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    for color in &mesh.colors {
        bin.extend_from_slice(color);
    }
    for i in mesh.indices() {
        bin.extend_from_slice(&i.to_le_bytes());
    }

    let bounds = VertexBounds::of(&mesh.positions).unwrap_or_default();

    let mut buffer_views = vec![
        BufferView {
            buffer: 0,
            byte_offset: 0,
            byte_length: positions_len,
            target: ARRAY_BUFFER,
        },
        BufferView {
            buffer: 0,
            byte_offset: positions_len,
            byte_length: colors_len,
            target: ARRAY_BUFFER,
        },
    ];
    let mut accessors = vec![
        Accessor {
            buffer_view: 0,
            component_type: FLOAT,
            normalized: false,
            count: vertex_count,
            kind: "VEC3",
            min: Some(bounds.min),
            max: Some(bounds.max),
        },
        Accessor {
            buffer_view: 1,
            component_type: UNSIGNED_BYTE,
            normalized: true,
            count: vertex_count,
            kind: "VEC4",
            min: None,
            max: None,
        },
    ];

    let mut attributes = BTreeMap::new();
    attributes.insert("POSITION", 0);
    attributes.insert("COLOR_0", 1);

    // Accessors may not be empty, so a grid without faces is emitted as a
    // point cloud.
    let (indices, mode) = if index_count > 0 {
        buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: positions_len + colors_len,
            byte_length: indices_len,
            target: ELEMENT_ARRAY_BUFFER,
        });
        accessors.push(Accessor {
            buffer_view: 2,
            component_type: UNSIGNED_INT,
            normalized: false,
            count: index_count,
            kind: "SCALAR",
            min: None,
            max: None,
        });
        (Some(2), MODE_TRIANGLES)
    } else {
        (None, MODE_POINTS)
    };

    let document = Document {
        asset: Asset {
            version: "2.0",
            generator: concat!("demesh ", env!("CARGO_PKG_VERSION")),
        },
        scene: 0,
        scenes: vec![Scene { nodes: vec![0] }],
        nodes: vec![Node {
            name: "terrain",
            mesh: 0,
        }],
        meshes: vec![Mesh {
            name: "terrain",
            primitives: vec![Primitive {
                attributes,
                indices,
                mode,
            }],
        }],
        accessors,
        buffer_views,
        buffers: vec![Buffer {
            byte_length: bin.len(),
            uri: None,
        }],
    };

    Packed { document, bin }
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn length_field(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| ExportError::BufferTooLarge { bytes: len })
}

// ============================================================================
// Writers
// ============================================================================

/// Write a binary glTF (`.glb`) container.
///
/// Layout: 12-byte header, a JSON chunk padded with spaces, then a BIN
/// chunk padded with zeros. Both chunks are 4-byte aligned.
pub fn write_glb<W: Write>(writer: &mut W, mesh: &TerrainMesh) -> Result<()> {
    let Packed { document, bin } = pack(mesh);
    let json = serde_json::to_vec(&document)?;

    let json_len = padded_len(json.len());
    let bin_len = padded_len(bin.len());
    let total = GLB_HEADER_LEN + CHUNK_HEADER_LEN + json_len + CHUNK_HEADER_LEN + bin_len;
    let total_field = length_field(total)?;

    writer.write_all(&GLB_MAGIC.to_le_bytes())?;
    writer.write_all(&GLB_VERSION.to_le_bytes())?;
    writer.write_all(&total_field.to_le_bytes())?;

    writer.write_all(&length_field(json_len)?.to_le_bytes())?;
    writer.write_all(&CHUNK_JSON.to_le_bytes())?;
    writer.write_all(&json)?;
    writer.write_all(&vec![b' '; json_len - json.len()])?;

    writer.write_all(&length_field(bin_len)?.to_le_bytes())?;
    writer.write_all(&CHUNK_BIN.to_le_bytes())?;
    writer.write_all(&bin)?;
    writer.write_all(&vec![0u8; bin_len - bin.len()])?;

    Ok(())
}

/// Write a standalone glTF JSON document with an embedded base64 buffer.
pub fn write_gltf<W: Write>(writer: &mut W, mesh: &TerrainMesh) -> Result<()> {
    let Packed { mut document, bin } = pack(mesh);
    document.buffers[0].uri = Some(format!(
        "data:application/octet-stream;base64,{}",
        BASE64.encode(&bin)
    ));
    serde_json::to_writer_pretty(&mut *writer, &document)?;
    writer.write_all(b"\n")?;
    Ok(())
}
