//! End-to-end conversion tests over synthetic grids.

use approx::assert_relative_eq;
use demesh_dem::{BoundingBox, ElevationGrid, GeoTransform};
use demesh_mesh::{convert, MeshOptions, TerrainMesh};

/// Square-ish pixels near the equator, `pixel_x` x `pixel_y` degrees.
fn transform(pixel_x: f64, pixel_y: f64) -> GeoTransform {
    let bounds = BoundingBox::new(-0.01, 0.01, 10.0, 10.02).unwrap();
    GeoTransform::new(pixel_x, pixel_y, bounds)
}

/// A deterministic bumpy grid.
fn bumpy_grid(width: usize, height: usize) -> ElevationGrid {
    let data = (0..width * height)
        .map(|i| {
            let (row, col) = (i / width, i % width);
            ((row * 7 + col * 13) % 50) as f32 + 100.0
        })
        .collect();
    ElevationGrid::new(width, height, data).unwrap()
}

fn convert_default(grid: ElevationGrid, transform: &GeoTransform) -> TerrainMesh {
    convert(grid, transform, &MeshOptions::default()).expect("conversion failed")
}

#[test]
fn test_vertex_and_face_counts() {
    for (w, h) in [(2, 2), (3, 2), (2, 5), (7, 4), (16, 9)] {
        let mesh = convert_default(bumpy_grid(w, h), &transform(0.001, 0.001));
        assert_eq!(mesh.vertex_count(), w * h, "vertices for {w}x{h}");
        assert_eq!(mesh.colors.len(), w * h, "colors for {w}x{h}");
        assert_eq!(mesh.face_count(), 2 * (w - 1) * (h - 1), "faces for {w}x{h}");
    }
}

#[test]
fn test_face_indices_in_range() {
    let (w, h) = (11, 6);
    let mesh = convert_default(bumpy_grid(w, h), &transform(0.001, 0.001));
    assert!(mesh.indices().all(|i| (i as usize) < w * h));
    // Every face is a proper triangle
    assert!(mesh
        .faces
        .iter()
        .all(|[a, b, c]| a != b && b != c && a != c));
}

#[test]
fn test_flat_grid_is_flat_and_green() {
    let grid = ElevationGrid::new(4, 3, vec![812.0; 12]).unwrap();
    let mesh = convert_default(grid, &transform(0.001, 0.001));

    assert!(mesh.positions.iter().all(|p| p[2] == 0.0));
    assert!(mesh.colors.iter().all(|c| *c == [34, 139, 34, 255]));
    assert_eq!(mesh.summary.stats.range, 1.0);
}

#[test]
fn test_longer_side_spans_target_size() {
    // Width-dominated and height-dominated rasters
    for (w, h, px, py) in [(20, 10, 0.001, 0.001), (5, 30, 0.001, 0.001), (10, 10, 0.002, 0.001)] {
        for exaggeration in [1.0, 3.0, 10.0] {
            let options = MeshOptions::with_exaggeration(exaggeration);
            let mesh = convert(bumpy_grid(w, h), &transform(px, py), &options).unwrap();
            let summary = mesh.summary;

            // The terrain footprint (w pixels by h pixels) fits the target
            let longer = summary.model_width.max(summary.model_height);
            assert_relative_eq!(longer, 100.0, epsilon = 1e-9);

            // Vertices sit at pixel corners, one pixel short of the footprint
            let size = summary.bounds.size();
            let res = summary.resolution;
            let expected_x = (w - 1) as f64 * res.pixel_width_m * summary.scale.xy;
            let expected_y = (h - 1) as f64 * res.pixel_height_m * summary.scale.xy;
            assert_relative_eq!(size[0] as f64, expected_x, epsilon = 1e-3);
            assert_relative_eq!(size[1] as f64, expected_y, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_exaggeration_multiplies_vertical_scale() {
    let t = transform(0.001, 0.001);

    let true_scale = convert(bumpy_grid(6, 6), &t, &MeshOptions::with_exaggeration(1.0)).unwrap();
    assert_eq!(true_scale.scale().z, true_scale.scale().xy);

    let tripled = convert(bumpy_grid(6, 6), &t, &MeshOptions::with_exaggeration(3.0)).unwrap();
    assert_relative_eq!(tripled.scale().z, 3.0 * tripled.scale().xy);

    // Horizontal layout does not depend on exaggeration
    assert_eq!(true_scale.scale().xy, tripled.scale().xy);
    for (a, b) in true_scale.positions.iter().zip(&tripled.positions) {
        assert_eq!(a[0], b[0]);
        assert_eq!(a[1], b[1]);
        assert_relative_eq!(b[2], a[2] * 3.0, max_relative = 1e-5);
    }
}

#[test]
fn test_true_proportions_at_unit_exaggeration() {
    // 100 m of relief over a ~1113 m wide raster keeps its real ratio
    let mut data = vec![0.0f32; 100];
    data[55] = 100.0;
    let grid = ElevationGrid::new(10, 10, data).unwrap();
    let mesh = convert(grid, &transform(0.001, 0.001), &MeshOptions::with_exaggeration(1.0)).unwrap();

    let summary = mesh.summary;
    let real_ratio = 100.0 / summary.resolution.terrain_width_m;
    assert_relative_eq!(summary.model_relief / summary.model_width, real_ratio, epsilon = 1e-9);
}

#[test]
fn test_no_data_cells_sit_at_minimum() {
    let grid = ElevationGrid::from_rows(&[
        [-32768.0f32, 20.0, 30.0],
        [25.0, -32768.0, 40.0],
        [20.0, 35.0, 30.0],
    ])
    .unwrap();
    let mesh = convert_default(grid, &transform(0.001, 0.001));

    let stats = mesh.summary.stats;
    assert_eq!(stats.min, 20.0);
    assert_eq!(stats.max, 40.0);
    assert_eq!(stats.missing, 2);
    assert_eq!(mesh.position(0, 0)[2], 0.0);
    assert_eq!(mesh.position(1, 1)[2], 0.0);
    assert_eq!(mesh.colors[mesh.vertex_index(1, 1)], [34, 139, 34, 255]);
    assert!(mesh.position(1, 2)[2] > 0.0);
}

#[test]
fn test_custom_no_data_value() {
    let grid = ElevationGrid::from_rows(&[[-9999.0f32, 5.0], [10.0, 15.0]]).unwrap();
    let options = MeshOptions {
        no_data: -9999.0,
        ..MeshOptions::default()
    };
    let mesh = convert(grid, &transform(0.001, 0.001), &options).unwrap();
    assert_eq!(mesh.summary.stats.min, 5.0);
    assert_eq!(mesh.position(0, 0)[2], 0.0);
}

#[test]
fn test_center_peak_example() {
    let grid = ElevationGrid::from_rows(&[
        [0.0f32, 0.0, 0.0],
        [0.0, 10.0, 0.0],
        [0.0, 0.0, 0.0],
    ])
    .unwrap();
    // Wider pixels than tall ones: terrain extent dominated by width
    let mesh = convert(grid, &transform(0.002, 0.001), &MeshOptions::with_exaggeration(1.0)).unwrap();

    let stats = mesh.summary.stats;
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 10.0);
    assert_eq!(stats.range, 10.0);
    assert!(mesh.summary.resolution.terrain_width_m > mesh.summary.resolution.terrain_height_m);

    let center = mesh.position(1, 1)[2];
    for (row, col) in [(0, 0), (0, 2), (2, 0), (2, 2)] {
        assert!(center > mesh.position(row, col)[2]);
    }
    assert_eq!(mesh.colors[4], [255, 255, 255, 255]);
}

#[test]
fn test_target_size_is_configurable() {
    let options = MeshOptions {
        target_size: 250.0,
        ..MeshOptions::default()
    };
    let mesh = convert(bumpy_grid(8, 4), &transform(0.001, 0.001), &options).unwrap();
    assert_relative_eq!(mesh.summary.model_width, 250.0, epsilon = 1e-9);
}

#[test]
fn test_large_grid_matches_row_major_layout() {
    let (w, h) = (257, 129);
    let mesh = convert_default(bumpy_grid(w, h), &transform(0.0005, 0.0005));
    let res = mesh.summary.resolution;
    let xy = mesh.scale().xy;

    for &(row, col) in &[(0, 0), (0, w - 1), (h - 1, 0), (h / 2, w / 3), (h - 1, w - 1)] {
        let p = mesh.position(row, col);
        assert_relative_eq!(p[0] as f64, col as f64 * res.pixel_width_m * xy, epsilon = 1e-3);
        assert_relative_eq!(p[1] as f64, row as f64 * res.pixel_height_m * xy, epsilon = 1e-3);
    }

    let block = (h / 2) * (w - 1) + w / 3;
    let tl = ((h / 2) * w + w / 3) as u32;
    assert_eq!(mesh.faces[2 * block], [tl, tl + w as u32, tl + 1]);
}
