//! Output container formats.

use crate::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base name of every exported file.
pub const OUTPUT_STEM: &str = "terrain_3d";

/// Mesh file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Binary glTF 2.0.
    #[default]
    Glb,
    /// glTF 2.0 JSON with the buffer embedded as a data URI.
    Gltf,
    /// Binary STL. Colors are dropped.
    Stl,
    /// Wavefront OBJ. Colors are dropped.
    Obj,
}

impl ExportFormat {
    /// All supported formats.
    pub const ALL: [ExportFormat; 4] = [Self::Glb, Self::Gltf, Self::Stl, Self::Obj];

    /// Parse a format name, falling back to [`ExportFormat::Glb`] for
    /// anything unrecognized.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Glb => "glb",
            Self::Gltf => "gltf",
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }

    /// MIME type to serve the file with.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Glb => "model/gltf-binary",
            Self::Gltf => "model/gltf+json",
            Self::Stl => "application/vnd.ms-pki.stl",
            Self::Obj => "text/plain",
        }
    }

    /// Output file name, e.g. `terrain_3d.glb`.
    pub fn file_name(self) -> String {
        format!("{}.{}", OUTPUT_STEM, self.extension())
    }

    /// Whether the format keeps per-vertex colors.
    pub fn keeps_colors(self) -> bool {
        matches!(self, Self::Glb | Self::Gltf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(name))
            .ok_or_else(|| ExportError::UnknownFormat(s.to_string()))
    }
}
