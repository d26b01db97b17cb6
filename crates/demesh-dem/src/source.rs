//! Remote elevation raster sources.
//!
//! Rasters are requested from the OpenTopography Global DEM API, which
//! returns a single GeoTIFF clipped to the requested bounding box.
//!
//! Source: https://portal.opentopography.org/API/globaldem

use crate::geo::BoundingBox;
use crate::{DemError, Result};
use std::time::Duration;

/// OpenTopography Global DEM API endpoint.
const OPENTOPOGRAPHY_BASE_URL: &str = "https://portal.opentopography.org/API/globaldem";

/// Default dataset: SRTM GL3 (90 m), which uses -32768 as its no-data value.
pub const DEFAULT_DEM_TYPE: &str = "SRTMGL3";

/// Request timeout for raster downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// A GeoTIFF request against the OpenTopography Global DEM API.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTopographyRequest {
    /// Area to clip.
    pub bounds: BoundingBox,
    /// Dataset name (e.g. `SRTMGL3`, `SRTMGL1`, `COP30`).
    pub dem_type: String,
    /// OpenTopography API key.
    pub api_key: String,
}

impl OpenTopographyRequest {
    /// Create a request for the default dataset.
    pub fn new(bounds: BoundingBox, api_key: impl Into<String>) -> Self {
        Self {
            bounds,
            dem_type: DEFAULT_DEM_TYPE.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Use a different dataset.
    pub fn with_dem_type(mut self, dem_type: impl Into<String>) -> Self {
        self.dem_type = dem_type.into();
        self
    }

    /// Full request URL.
    pub fn url(&self) -> String {
        format!(
            "{}?demtype={}&south={}&north={}&west={}&east={}&outputFormat=GTiff&API_Key={}",
            OPENTOPOGRAPHY_BASE_URL,
            self.dem_type,
            self.bounds.south,
            self.bounds.north,
            self.bounds.west,
            self.bounds.east,
            self.api_key
        )
    }
}

/// Downloads raw raster bytes over HTTP.
pub struct RasterFetcher {
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for RasterFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterFetcher")
            .field("timeout", &DOWNLOAD_TIMEOUT)
            .finish()
    }
}

impl RasterFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch the body at `url`.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(DemError::DownloadFailed {
                url: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes()?;
        if bytes.is_empty() {
            return Err(DemError::DownloadFailed {
                url: url.to_string(),
                reason: "empty response body".to_string(),
            });
        }
        Ok(bytes.to_vec())
    }

    /// Fetch the GeoTIFF for an OpenTopography request.
    pub fn fetch_opentopography(&self, request: &OpenTopographyRequest) -> Result<Vec<u8>> {
        self.fetch(&request.url())
    }
}
