//! Load, convert, export.

use crate::config::RunConfig;
use crate::{Result, RunnerError};
use demesh_dem::{BoundingBox, DemRaster, OpenTopographyRequest, RasterFetcher};
use demesh_export::{export_mesh, ExportFormat};
use demesh_mesh::{convert, elevation_stats, ElevationStats, GroundResolution, MeshSummary, TerrainMesh};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the elevation raster comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterInput {
    /// A GeoTIFF on disk.
    File(PathBuf),
    /// A GeoTIFF served at a URL.
    Url(String),
    /// An area fetched from OpenTopography.
    Bbox(BoundingBox),
}

impl fmt::Display for RasterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterInput::File(path) => write!(f, "{}", path.display()),
            RasterInput::Url(url) => f.write_str(url),
            RasterInput::Bbox(b) => write!(
                f,
                "OpenTopography S{} N{} W{} E{}",
                b.south, b.north, b.west, b.east
            ),
        }
    }
}

/// Result of a completed conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// File that was written.
    pub path: PathBuf,
    pub format: ExportFormat,
    /// Size of the written file.
    pub bytes: usize,
    pub summary: MeshSummary,
    pub vertex_count: usize,
    pub face_count: usize,
}

/// OpenTopography request for `bounds` using the configured key and dataset.
pub fn opentopography_request(bounds: BoundingBox, config: &RunConfig) -> Result<OpenTopographyRequest> {
    let key = config.api_key()?;
    Ok(OpenTopographyRequest::new(bounds, key).with_dem_type(&config.opentopography.dem_type))
}

/// Read or download the raster.
pub fn load_input(input: &RasterInput, config: &RunConfig) -> Result<DemRaster> {
    info!("Loading raster from {}", input);
    let raster = match input {
        RasterInput::File(path) => DemRaster::from_file(path)?,
        RasterInput::Url(url) => {
            let bytes = RasterFetcher::new()?.fetch(url)?;
            debug!("Downloaded {} bytes", bytes.len());
            DemRaster::from_bytes(&bytes)?
        }
        RasterInput::Bbox(bounds) => {
            let request = opentopography_request(*bounds, config)?;
            let bytes = RasterFetcher::new()?.fetch_opentopography(&request)?;
            debug!("Downloaded {} bytes", bytes.len());
            DemRaster::from_bytes(&bytes)?
        }
    };

    let (width, height) = raster.dimensions();
    info!("Raster: {}x{} samples", width, height);
    if let Some(no_data) = raster.no_data_value {
        debug!("Raster NODATA value: {}", no_data);
    }
    Ok(raster)
}

/// Convert a raster with the configured options and log what was built.
pub fn build_mesh(raster: DemRaster, config: &RunConfig) -> Result<TerrainMesh> {
    let options = config.mesh_options(raster.no_data_value);
    debug!("Mesh options: {:?}", options);

    let (grid, transform) = raster.into_parts();
    let mesh = convert(grid, &transform, &options)?;

    log_summary(&mesh.summary);
    info!(
        "Mesh: {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Log conversion diagnostics.
pub fn log_summary(summary: &MeshSummary) {
    let res = &summary.resolution;
    let stats = &summary.stats;

    if summary.unit_spacing {
        warn!("Raster pixel size is unusable, falling back to 1 m spacing");
    }
    info!(
        "Ground resolution: {:.2} m x {:.2} m per pixel",
        res.pixel_width_m, res.pixel_height_m
    );
    info!(
        "Terrain size: {:.0} m x {:.0} m",
        res.terrain_width_m, res.terrain_height_m
    );
    if stats.missing > 0 {
        info!("{} missing cells filled with the minimum elevation", stats.missing);
    }
    info!(
        "Elevation: min {:.1} m, max {:.1} m, range {:.1} m",
        stats.min, stats.max, stats.range
    );
    info!(
        "Scale: xy {:.6}, z {:.6} ({}x exaggeration)",
        summary.scale.xy, summary.scale.z, summary.exaggeration
    );
    info!(
        "Model: {:.2} x {:.2} units, relief {:.2} units ({:.1}% of width)",
        summary.model_width,
        summary.model_height,
        summary.model_relief,
        summary.relief_ratio_percent()
    );

    let b = &summary.bounds;
    debug!("Vertex X: {:.3} .. {:.3}", b.min[0], b.max[0]);
    debug!("Vertex Y: {:.3} .. {:.3}", b.min[1], b.max[1]);
    debug!("Vertex Z: {:.3} .. {:.3}", b.min[2], b.max[2]);
}

/// Encode `mesh` and write it into `dir` as `terrain_3d.<ext>`.
pub fn write_mesh_file(mesh: &TerrainMesh, format: ExportFormat, dir: &Path) -> Result<(PathBuf, usize)> {
    let (width, height) = mesh.dimensions();
    let bytes = export_mesh(mesh, format).map_err(|source| RunnerError::Export {
        format,
        width,
        height,
        source,
    })?;

    std::fs::create_dir_all(dir).map_err(|source| RunnerError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(format.file_name());
    std::fs::write(&path, &bytes).map_err(|source| RunnerError::Write {
        path: path.clone(),
        source,
    })?;

    info!(
        "Wrote {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        format.media_type()
    );
    if !format.keeps_colors() {
        debug!("{} output does not store vertex colors", format);
    }
    Ok((path, bytes.len()))
}

/// Run a full conversion.
pub fn run(input: &RasterInput, config: &RunConfig) -> Result<ConversionOutput> {
    let format = config.export_format();
    let raster = load_input(input, config)?;
    let mesh = build_mesh(raster, config)?;
    let (path, bytes) = write_mesh_file(&mesh, format, &config.output)?;

    Ok(ConversionOutput {
        path,
        format,
        bytes,
        summary: mesh.summary,
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
    })
}

/// Descriptive figures for a raster, without building a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterInfo {
    pub width: usize,
    pub height: usize,
    pub bounds: BoundingBox,
    pub resolution: GroundResolution,
    pub no_data: f32,
    pub stats: ElevationStats,
}

/// Describe a raster using the configured no-data precedence.
pub fn describe_raster(raster: &DemRaster, config: &RunConfig) -> RasterInfo {
    let (width, height) = raster.dimensions();
    let no_data = config.mesh_options(raster.no_data_value).no_data;
    RasterInfo {
        width,
        height,
        bounds: raster.transform.bounds,
        resolution: GroundResolution::from_transform(&raster.transform, width, height),
        no_data,
        stats: elevation_stats(&raster.grid, no_data),
    }
}

/// Log a [`RasterInfo`].
pub fn log_raster_info(info: &RasterInfo) {
    let b = &info.bounds;
    info!("Size: {}x{} samples", info.width, info.height);
    info!(
        "Bounds: south {:.6}, north {:.6}, west {:.6}, east {:.6}",
        b.south, b.north, b.west, b.east
    );
    info!(
        "Ground resolution: {:.2} m x {:.2} m per pixel",
        info.resolution.pixel_width_m, info.resolution.pixel_height_m
    );
    info!(
        "Terrain size: {:.0} m x {:.0} m",
        info.resolution.terrain_width_m, info.resolution.terrain_height_m
    );
    info!(
        "Elevation: min {:.1} m, max {:.1} m, {} missing (NODATA {})",
        info.stats.min, info.stats.max, info.stats.missing, info.no_data
    );
}
