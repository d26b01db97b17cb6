//! Run configuration.
//!
//! Values come from an optional YAML file and are then overridden by
//! command-line flags:
//!
//! ```yaml
//! exaggeration: 2.0
//! target_size: 150
//! format: stl
//! output: ./models
//! opentopography:
//!   api_key: abc123
//!   dem_type: COP30
//! ```

use crate::{Result, RunnerError};
use demesh_dem::{BoundingBox, DEFAULT_DEM_TYPE};
use demesh_export::ExportFormat;
use demesh_mesh::{MeshOptions, DEFAULT_EXAGGERATION, DEFAULT_NO_DATA, DEFAULT_TARGET_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// OpenTopography access settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenTopographyConfig {
    /// API key; may also come from `OPENTOPOGRAPHY_API_KEY`.
    pub api_key: Option<String>,
    /// Dataset to request.
    pub dem_type: String,
}

impl Default for OpenTopographyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            dem_type: DEFAULT_DEM_TYPE.to_string(),
        }
    }
}

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Vertical exaggeration.
    pub exaggeration: f64,
    /// Length of the longer horizontal side of the model, in scene units.
    pub target_size: f64,
    /// Missing-data sentinel. When unset the raster's own NODATA tag is
    /// used, then -32768.
    pub no_data: Option<f32>,
    /// Output format name. Unknown names fall back to `glb`.
    pub format: String,
    /// Directory the mesh file is written into.
    pub output: PathBuf,
    /// Remote raster source.
    pub opentopography: OpenTopographyConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            exaggeration: DEFAULT_EXAGGERATION,
            target_size: DEFAULT_TARGET_SIZE,
            no_data: None,
            format: ExportFormat::default().to_string(),
            output: PathBuf::from("."),
            opentopography: OpenTopographyConfig::default(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub exaggeration: Option<f64>,
    pub target_size: Option<f64>,
    pub no_data: Option<f32>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub api_key: Option<String>,
    pub dem_type: Option<String>,
}

impl RunConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| RunnerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Load `path` if given, otherwise start from defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            exaggeration,
            target_size,
            no_data,
            format,
            output,
            api_key,
            dem_type,
        } = overrides;

        if let Some(v) = exaggeration {
            self.exaggeration = v;
        }
        if let Some(v) = target_size {
            self.target_size = v;
        }
        if no_data.is_some() {
            self.no_data = no_data;
        }
        if let Some(v) = format {
            self.format = v;
        }
        if let Some(v) = output {
            self.output = v;
        }
        if api_key.is_some() {
            self.opentopography.api_key = api_key;
        }
        if let Some(v) = dem_type {
            self.opentopography.dem_type = v;
        }
    }

    /// Resolved output format.
    pub fn export_format(&self) -> ExportFormat {
        match self.format.parse() {
            Ok(format) => format,
            Err(_) => {
                let fallback = ExportFormat::default();
                warn!("Unknown format '{}', using {}", self.format, fallback);
                fallback
            }
        }
    }

    /// Engine options, using `raster_no_data` when no sentinel was configured.
    pub fn mesh_options(&self, raster_no_data: Option<f32>) -> MeshOptions {
        MeshOptions {
            exaggeration: self.exaggeration,
            no_data: self.no_data.or(raster_no_data).unwrap_or(DEFAULT_NO_DATA),
            target_size: self.target_size,
        }
    }

    /// Configured API key, if any non-empty one is set.
    pub fn api_key(&self) -> Result<&str> {
        self.opentopography
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(RunnerError::MissingApiKey)
    }
}

/// Parse a `south,north,west,east` bounding box.
pub fn parse_bbox(input: &str) -> Result<BoundingBox> {
    let invalid = |reason: String| RunnerError::InvalidBbox {
        input: input.to_string(),
        reason,
    };

    let values = input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| invalid(format!("'{}' is not a number", part.trim())))
        })
        .collect::<Result<Vec<_>>>()?;

    let &[south, north, west, east] = values.as_slice() else {
        return Err(invalid(format!(
            "expected 4 values (south,north,west,east), found {}",
            values.len()
        )));
    };
    BoundingBox::new(south, north, west, east).map_err(|e| invalid(e.to_string()))
}
