//! JSON raster mask reader.
//!
//! A mask file holds a single band:
//!
//! ```json
//! {
//!   "width": 3, "height": 2, "nodata": 0,
//!   "transform": [500000.0, 10.0, 0.0, 4200000.0, 0.0, -10.0],
//!   "crs": "EPSG:32633",
//!   "data": [0, 1, 1, 0, 1, 1]
//! }
//! ```
//!
//! Cells equal to `nodata` (default 0) or `null` are outside the footprint.
//! `transform` uses GDAL ordering and defaults to the identity.

use std::fs;
use std::path::Path;

use seamline_core::{GeoTransform, Mask, MaskReader, Result};
use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// On-disk representation of a mask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskFile {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Value marking cells outside the footprint
    #[serde(default)]
    pub nodata: f64,
    /// Affine pixel-to-world transform in GDAL ordering
    #[serde(default = "identity_transform")]
    pub transform: [f64; 6],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
    /// Row-major cell values
    pub data: Vec<Option<f64>>,
}

fn identity_transform() -> [f64; 6] {
    GeoTransform::identity().0
}

impl MaskFile {
    /// Parses a mask file from a JSON string.
    pub fn from_json_str(content: &str) -> std::result::Result<Self, IoError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Converts to a validated [`Mask`].
    pub fn into_mask(self) -> Result<Mask> {
        let values: Vec<f64> = self
            .data
            .iter()
            .map(|v| v.unwrap_or(self.nodata))
            .collect();
        let mask = Mask::from_values(
            self.width,
            self.height,
            &values,
            self.nodata,
            GeoTransform(self.transform),
        )?;

        Ok(match self.crs {
            Some(crs) => mask.with_crs(crs),
            None => mask,
        })
    }
}

/// Reads [`MaskFile`] JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMaskReader;

impl JsonMaskReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl MaskReader for JsonMaskReader {
    fn read_mask(&self, path: &Path) -> Result<Mask> {
        let content = fs::read_to_string(path).map_err(IoError::from)?;
        let mask = MaskFile::from_json_str(&content)?.into_mask()?;
        log::debug!(
            "Read mask {}: {}x{}, {} inside cells",
            path.display(),
            mask.width(),
            mask.height(),
            mask.inside_count()
        );
        Ok(mask)
    }
}
