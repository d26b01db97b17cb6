//! Integration tests for the container encoders.

use approx::assert_relative_eq;
use base64::Engine as _;
use demesh_dem::{BoundingBox, ElevationGrid, GeoTransform};
use demesh_export::{export_mesh, parse_obj, stl_size, ExportFormat, CHUNK_BIN, CHUNK_JSON, GLB_MAGIC};
use demesh_mesh::{convert, MeshOptions, TerrainMesh};
use serde_json::Value;

fn terrain(width: usize, height: usize) -> TerrainMesh {
    let data = (0..width * height)
        .map(|i| ((i % width) as f32 * 3.0 + (i / width) as f32 * 7.0) % 50.0)
        .collect();
    let grid = ElevationGrid::new(width, height, data).expect("grid");
    let bounds = BoundingBox::new(46.0, 46.01, 7.0, 7.01).expect("bounds");
    let transform = GeoTransform::new(0.001, 0.001, bounds);
    convert(grid, &transform, &MeshOptions::default()).expect("convert")
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

/// Split a GLB into its JSON document and BIN payload.
fn split_glb(bytes: &[u8]) -> (Value, &[u8]) {
    assert_eq!(u32_at(bytes, 0), GLB_MAGIC);
    assert_eq!(u32_at(bytes, 4), 2);
    assert_eq!(u32_at(bytes, 8) as usize, bytes.len());

    let json_len = u32_at(bytes, 12) as usize;
    assert_eq!(u32_at(bytes, 16), CHUNK_JSON);
    assert_eq!(json_len % 4, 0);
    let json: Value = serde_json::from_slice(&bytes[20..20 + json_len]).expect("json chunk");

    let bin_start = 20 + json_len;
    let bin_len = u32_at(bytes, bin_start) as usize;
    assert_eq!(u32_at(bytes, bin_start + 4), CHUNK_BIN);
    assert_eq!(bin_len % 4, 0);
    assert_eq!(bin_start + 8 + bin_len, bytes.len());

    (json, &bytes[bin_start + 8..])
}

#[test]
fn test_glb_structure() {
    let mesh = terrain(6, 4);
    let bytes = export_mesh(&mesh, ExportFormat::Glb).expect("export");
    let (doc, bin) = split_glb(&bytes);

    assert_eq!(doc["asset"]["version"], "2.0");
    let primitive = &doc["meshes"][0]["primitives"][0];
    assert_eq!(primitive["mode"], 4);
    assert_eq!(primitive["attributes"]["POSITION"], 0);
    assert_eq!(primitive["attributes"]["COLOR_0"], 1);
    assert_eq!(primitive["indices"], 2);

    let accessors = doc["accessors"].as_array().unwrap();
    assert_eq!(accessors[0]["count"], 24);
    assert_eq!(accessors[0]["type"], "VEC3");
    assert_eq!(accessors[1]["componentType"], 5121);
    assert_eq!(accessors[1]["normalized"], true);
    assert_eq!(accessors[2]["count"], mesh.face_count() * 3);

    let byte_length = doc["buffers"][0]["byteLength"].as_u64().unwrap() as usize;
    assert_eq!(byte_length, 24 * 12 + 24 * 4 + mesh.face_count() * 12);
    assert!(bin.len() >= byte_length);
    assert!(doc["buffers"][0].get("uri").is_none());

    // First position and first index are stored verbatim
    let first = mesh.positions[0];
    assert_eq!(f32_at(bin, 0), first[0]);
    assert_eq!(f32_at(bin, 4), first[1]);
    assert_eq!(f32_at(bin, 8), first[2]);
    let indices_offset = doc["bufferViews"][2]["byteOffset"].as_u64().unwrap() as usize;
    assert_eq!(u32_at(bin, indices_offset), mesh.faces[0][0]);
    assert_eq!(u32_at(bin, indices_offset + 4), mesh.faces[0][1]);
}

#[test]
fn test_glb_position_bounds_match_mesh() {
    let mesh = terrain(5, 5);
    let bytes = export_mesh(&mesh, ExportFormat::Glb).expect("export");
    let (doc, _) = split_glb(&bytes);

    let min = &doc["accessors"][0]["min"];
    let max = &doc["accessors"][0]["max"];
    for axis in 0..3 {
        assert_relative_eq!(
            min[axis].as_f64().unwrap() as f32,
            mesh.summary.bounds.min[axis]
        );
        assert_relative_eq!(
            max[axis].as_f64().unwrap() as f32,
            mesh.summary.bounds.max[axis]
        );
    }
}

#[test]
fn test_glb_without_faces_is_a_point_cloud() {
    let mesh = terrain(5, 1);
    assert_eq!(mesh.face_count(), 0);

    let bytes = export_mesh(&mesh, ExportFormat::Glb).expect("export");
    let (doc, _) = split_glb(&bytes);
    let primitive = &doc["meshes"][0]["primitives"][0];
    assert_eq!(primitive["mode"], 0);
    assert!(primitive.get("indices").is_none());
    assert_eq!(doc["accessors"].as_array().unwrap().len(), 2);
}

#[test]
fn test_gltf_embeds_buffer() {
    let mesh = terrain(4, 3);
    let bytes = export_mesh(&mesh, ExportFormat::Gltf).expect("export");
    let doc: Value = serde_json::from_slice(&bytes).expect("json");

    let buffer = &doc["buffers"][0];
    let uri = buffer["uri"].as_str().unwrap();
    let payload = uri
        .strip_prefix("data:application/octet-stream;base64,")
        .expect("data uri");
    let bin = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .expect("base64");
    assert_eq!(bin.len() as u64, buffer["byteLength"].as_u64().unwrap());

    // Colors follow the positions
    let colors_offset = mesh.vertex_count() * 12;
    assert_eq!(&bin[colors_offset..colors_offset + 4], &mesh.colors[0]);
}

#[test]
fn test_stl_layout() {
    let mesh = terrain(7, 5);
    let bytes = export_mesh(&mesh, ExportFormat::Stl).expect("export");

    assert_eq!(bytes.len(), stl_size(mesh.face_count()));
    assert_eq!(u32_at(&bytes, 80) as usize, mesh.face_count());

    // Second vertex of the first triangle
    let [_, b, _] = mesh.faces[0];
    let expected = mesh.positions[b as usize];
    let record = 84;
    for axis in 0..3 {
        assert_eq!(f32_at(&bytes, record + 24 + axis * 4), expected[axis]);
    }
}

#[test]
fn test_stl_flat_terrain_normals_agree() {
    let grid = ElevationGrid::new(4, 4, vec![12.0; 16]).unwrap();
    let bounds = BoundingBox::new(0.0, 0.004, 0.0, 0.004).unwrap();
    let mesh = convert(grid, &GeoTransform::new(0.001, 0.001, bounds), &MeshOptions::default()).unwrap();
    let bytes = export_mesh(&mesh, ExportFormat::Stl).unwrap();

    let first_z = f32_at(&bytes, 84 + 8);
    assert_relative_eq!(first_z.abs(), 1.0, epsilon = 1e-5);
    for face in 0..mesh.face_count() {
        let record = 84 + face * 50;
        assert_eq!(f32_at(&bytes, record), 0.0);
        assert_eq!(f32_at(&bytes, record + 4), 0.0);
        assert_relative_eq!(f32_at(&bytes, record + 8), first_z, epsilon = 1e-5);
    }
}

#[test]
fn test_obj_round_trip() {
    let mesh = terrain(9, 6);
    let bytes = export_mesh(&mesh, ExportFormat::Obj).expect("export");
    let text = String::from_utf8(bytes).expect("utf8");

    let parsed = parse_obj(&text).expect("parse");
    assert_eq!(parsed.positions.len(), mesh.vertex_count());
    assert_eq!(parsed.faces, mesh.faces);
    assert_eq!(parsed.positions, mesh.positions);
}

#[test]
fn test_every_format_encodes() {
    let mesh = terrain(3, 3);
    for format in ExportFormat::ALL {
        let bytes = export_mesh(&mesh, format).expect("export");
        assert!(!bytes.is_empty(), "{format} produced no output");
    }
}
