//! GeoTIFF elevation raster loading.

use crate::geo::GeoTransform;
use crate::grid::ElevationGrid;
use crate::{DemError, Result};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;

/// A single-band elevation raster decoded from a GeoTIFF.
#[derive(Debug, Clone)]
pub struct DemRaster {
    /// Elevation samples, north to south, west to east.
    pub grid: ElevationGrid,
    /// Pixel spacing and bounds.
    pub transform: GeoTransform,
    /// No-data value declared by the file, if any.
    pub no_data_value: Option<f32>,
}

impl DemRaster {
    /// Decode a raster held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(Cursor::new(bytes))
    }

    /// Load a raster from a GeoTIFF file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::decode(std::io::BufReader::new(file))
    }

    fn decode<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut decoder = Decoder::new(reader)?;

        // Allow whole-raster decodes well beyond the crate defaults
        let mut limits = Limits::default();
        limits.decoding_buffer_size = 1024 * 1024 * 1024; // 1 GB
        limits.intermediate_buffer_size = 1024 * 1024 * 1024; // 1 GB
        limits.ifd_value_size = 1024 * 1024 * 1024;
        decoder = decoder.with_limits(limits);

        let samples = Self::samples_per_pixel(&mut decoder)?;
        if samples != 1 {
            return Err(DemError::MultiBand { samples });
        }

        let (width, height) = decoder.dimensions()?;
        let (width, height) = (width as usize, height as usize);

        let transform = Self::read_geotransform(&mut decoder, width, height)?;
        let no_data_value = Self::read_nodata_value(&mut decoder);
        let data = Self::decode_elevation_data(&mut decoder)?;
        let grid = ElevationGrid::new(width, height, data)?;

        Ok(Self {
            grid,
            transform,
            no_data_value,
        })
    }

    fn samples_per_pixel<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<u16> {
        match decoder.find_tag(Tag::SamplesPerPixel)? {
            Some(value) => Ok(value.into_u16()?),
            None => Ok(1),
        }
    }

    /// Read pixel spacing and bounds from the GeoTIFF model tags.
    fn read_geotransform<R: Read + Seek>(
        decoder: &mut Decoder<R>,
        width: usize,
        height: usize,
    ) -> Result<GeoTransform> {
        let tiepoint = decoder.get_tag_f64_vec(Tag::ModelTiepointTag);
        let pixel_scale = decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag);

        if let (Ok(tiepoint), Ok(scale)) = (tiepoint, pixel_scale) {
            if tiepoint.len() >= 6 && scale.len() >= 2 {
                // Tiepoint format: [i, j, k, x, y, z], raster (i, j) maps to model (x, y)
                let (i, j) = (tiepoint[0], tiepoint[1]);
                let (scale_x, scale_y) = (scale[0].abs(), scale[1].abs());
                let west = tiepoint[3] - i * scale_x;
                let north = tiepoint[4] + j * scale_y;
                return GeoTransform::from_origin(west, north, scale_x, scale_y, width, height);
            }
            return Err(DemError::InvalidGeoTiff(format!(
                "tiepoint has {} values and pixel scale has {}",
                tiepoint.len(),
                scale.len()
            )));
        }

        if let Ok(matrix) = decoder.get_tag_f64_vec(Tag::ModelTransformationTag) {
            if matrix.len() < 16 {
                return Err(DemError::InvalidGeoTiff(format!(
                    "model transformation has {} values, expected 16",
                    matrix.len()
                )));
            }
            // Row-major 4x4: x = m0*i + m1*j + m3, y = m4*i + m5*j + m7
            if matrix[1] != 0.0 || matrix[4] != 0.0 {
                return Err(DemError::InvalidGeoTiff(
                    "rotated model transformation is not supported".to_string(),
                ));
            }
            return GeoTransform::from_origin(
                matrix[3], matrix[7], matrix[0], matrix[5], width, height,
            );
        }

        Err(DemError::InvalidGeoTiff(
            "no ModelTiepoint/ModelPixelScale or ModelTransformation tags".to_string(),
        ))
    }

    /// Decode elevation data from the TIFF decoder.
    fn decode_elevation_data<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Vec<f32>> {
        let result = decoder.read_image()?;

        match result {
            DecodingResult::F32(data) => Ok(data),
            DecodingResult::F64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U16(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U32(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I8(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::U64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
            DecodingResult::I64(data) => Ok(data.into_iter().map(|v| v as f32).collect()),
        }
    }

    /// Try to read the no-data value from the GDAL_NODATA tag.
    fn read_nodata_value<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f32> {
        let text = decoder
            .get_tag_ascii_string(Tag::GdalNodata)
            .ok()?;
        text.trim_matches(|c: char| c == '\0' || c.is_whitespace())
            .parse()
            .ok()
    }

    /// Dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }

    /// Split into the grid and its georeferencing.
    pub fn into_parts(self) -> (ElevationGrid, GeoTransform) {
        (self.grid, self.transform)
    }
}

/// Decode a GeoTIFF held in memory into an elevation grid and geotransform.
pub fn load_raster(bytes: &[u8]) -> Result<(ElevationGrid, GeoTransform)> {
    DemRaster::from_bytes(bytes).map(DemRaster::into_parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = load_raster(b"definitely not a tiff").unwrap_err();
        assert!(matches!(err, DemError::TiffDecode(_)));
    }

    /// Encode a 2x2 float raster, running `$body` against its directory.
    macro_rules! encode_with {
        (|$dir:ident| $body:block) => {{
            use tiff::encoder::{colortype, TiffEncoder};

            let mut buf = Cursor::new(Vec::new());
            {
                let mut encoder = TiffEncoder::new(&mut buf).unwrap();
                let mut image = encoder.new_image::<colortype::Gray32Float>(2, 2).unwrap();
                {
                    let $dir = image.encoder();
                    $body
                }
                image.write_data(&[1.0f32, 2.0, 3.0, 4.0][..]).unwrap();
            }
            buf.into_inner()
        }};
    }

    #[test]
    fn test_geo_tags_are_found_by_name() {
        let bytes = encode_with!(|dir| {
            dir.write_tag(Tag::ModelPixelScaleTag, &[0.5f64, 0.25, 0.0][..]).unwrap();
            dir.write_tag(Tag::ModelTiepointTag, &[0.0f64, 0.0, 0.0, 10.0, 20.0, 0.0][..])
                .unwrap();
            dir.write_tag(Tag::GdalNodata, "-9999").unwrap();
        });

        let mut decoder = Decoder::new(Cursor::new(&bytes)).unwrap();
        assert!(decoder.find_tag(Tag::ModelPixelScaleTag).unwrap().is_some());
        assert_eq!(
            decoder.get_tag_f64_vec(Tag::ModelTiepointTag).unwrap(),
            vec![0.0, 0.0, 0.0, 10.0, 20.0, 0.0]
        );
        assert_eq!(DemRaster::read_nodata_value(&mut decoder), Some(-9999.0));

        let raster = DemRaster::from_bytes(&bytes).unwrap();
        assert_eq!(raster.transform.pixel_size_x, 0.5);
        assert_eq!(raster.transform.pixel_size_y, 0.25);
        assert_eq!(raster.transform.bounds.west, 10.0);
        assert_eq!(raster.transform.bounds.north, 20.0);
        assert_eq!(raster.transform.bounds.south, 19.5);
        assert_eq!(raster.no_data_value, Some(-9999.0));
    }

    #[test]
    fn test_transformation_tag_is_found_by_name() {
        let matrix = [
            2.0f64, 0.0, 0.0, -5.0, //
            0.0, -2.0, 0.0, 8.0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let bytes = encode_with!(|dir| {
            dir.write_tag(Tag::ModelTransformationTag, &matrix[..]).unwrap();
        });

        let mut decoder = Decoder::new(Cursor::new(&bytes)).unwrap();
        assert_eq!(
            decoder.get_tag_f64_vec(Tag::ModelTransformationTag).unwrap(),
            matrix.to_vec()
        );
        let transform = DemRaster::read_geotransform(&mut decoder, 2, 2).unwrap();
        assert_eq!(transform.bounds.west, -5.0);
        assert_eq!(transform.bounds.east, -1.0);
        assert_eq!(transform.bounds.south, 4.0);
    }

    #[test]
    fn test_empty_input_fails_to_decode() {
        assert!(DemRaster::from_bytes(&[]).is_err());
    }
}
