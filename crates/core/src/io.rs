//! Contracts for the collaborators around the seamline core: mask readers,
//! footprint polygon extraction and vector output.

use std::path::Path;

use crate::geometry::{Footprint, SegmentedFootprint};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Affine transform from raster cell indices to world coordinates.
///
/// Coefficients follow the GDAL ordering `[c, a, b, f, d, e]`:
/// `x = c + col * a + row * b`, `y = f + col * d + row * e`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// Identity transform: cell (col, row) maps to (col, row).
    pub fn identity() -> Self {
        Self([0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// North-up transform with square cells.
    pub fn north_up(origin_x: f64, origin_y: f64, cell_size: f64) -> Self {
        Self([origin_x, cell_size, 0.0, origin_y, 0.0, -cell_size])
    }

    /// Maps a (fractional) cell position to world coordinates.
    #[inline]
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        let [c, a, b, f, d, e] = self.0;
        (c + col * a + row * b, f + col * d + row * e)
    }

    /// Returns the determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let [_, a, b, _, d, e] = self.0;
        a * e - b * d
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// A single-band validity mask.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    transform: GeoTransform,
    crs: Option<String>,
}

impl Mask {
    /// Creates a mask from row-major cells (`true` = inside the footprint).
    pub fn new(
        width: usize,
        height: usize,
        cells: Vec<bool>,
        transform: GeoTransform,
    ) -> Result<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            Error::InvalidMask(format!("{}x{} mask is too large", width, height))
        })?;
        if cells.len() != expected {
            return Err(Error::InvalidMask(format!(
                "expected {} cells for a {}x{} mask, got {}",
                expected,
                width,
                height,
                cells.len()
            )));
        }

        if transform.determinant() == 0.0 {
            return Err(Error::InvalidMask(
                "geotransform is singular".to_string(),
            ));
        }

        Ok(Self {
            width,
            height,
            cells,
            transform,
            crs: None,
        })
    }

    /// Builds a mask from raw band values, marking cells unequal to `nodata` as inside.
    pub fn from_values(
        width: usize,
        height: usize,
        values: &[f64],
        nodata: f64,
        transform: GeoTransform,
    ) -> Result<Self> {
        let cells = values
            .iter()
            .map(|&v| if nodata.is_nan() { !v.is_nan() } else { v != nodata })
            .collect();
        Self::new(width, height, cells, transform)
    }

    /// Attaches a coordinate reference system name.
    pub fn with_crs(mut self, crs: impl Into<String>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    /// Returns the mask width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the cell at (col, row) is inside the footprint.
    #[inline]
    pub fn is_inside(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.cells[row * self.width + col]
    }

    /// Returns the number of inside cells.
    pub fn inside_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Returns the cell-to-world transform.
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Returns the coordinate reference system, if known.
    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }
}

/// Reads a validity mask from storage.
pub trait MaskReader {
    /// Reads the mask stored at `path`.
    fn read_mask(&self, path: &Path) -> Result<Mask>;
}

/// Turns a mask into the footprint polygon of its image.
pub trait PolygonExtractor {
    /// Returns the largest polygon of the mask.
    ///
    /// Fails with [`Error::NoFootprintFound`] when the mask holds no inside cell.
    fn extract(&self, label: &str, mask: &Mask) -> Result<Footprint>;
}

/// Writes segmented footprints to a vector layer.
pub trait VectorWriter {
    /// Writes one record per segmented footprint.
    fn write(
        &self,
        path: &Path,
        crs: Option<&str>,
        footprints: &[SegmentedFootprint],
    ) -> Result<()>;
}

/// Derives the image label from a mask path (its file stem).
pub fn label_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geotransform_apply() {
        let t = GeoTransform::north_up(100.0, 50.0, 2.0);
        assert_eq!(t.apply(0.0, 0.0), (100.0, 50.0));
        assert_eq!(t.apply(3.0, 1.0), (106.0, 48.0));
        assert_eq!(t.determinant(), -4.0);
    }

    #[test]
    fn test_mask_shape_check() {
        let err = Mask::new(2, 2, vec![true; 3], GeoTransform::identity());
        assert!(matches!(err, Err(Error::InvalidMask(_))));
    }

    #[test]
    fn test_mask_size_overflow() {
        let side = 1usize << (usize::BITS / 2);
        let err = Mask::new(side, side, Vec::new(), GeoTransform::identity());
        assert!(matches!(err, Err(Error::InvalidMask(_))));
    }

    #[test]
    fn test_mask_singular_transform() {
        let t = GeoTransform([0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(Mask::new(1, 1, vec![true], t).is_err());
    }

    #[test]
    fn test_mask_from_values() {
        let mask = Mask::from_values(
            3,
            1,
            &[0.0, 5.0, 7.0],
            0.0,
            GeoTransform::identity(),
        )
        .unwrap();
        assert!(!mask.is_inside(0, 0));
        assert!(mask.is_inside(1, 0));
        assert!(mask.is_inside(2, 0));
        assert!(!mask.is_inside(3, 0));
        assert_eq!(mask.inside_count(), 2);
    }

    #[test]
    fn test_mask_nan_nodata() {
        let mask = Mask::from_values(
            2,
            1,
            &[f64::NAN, 1.0],
            f64::NAN,
            GeoTransform::identity(),
        )
        .unwrap();
        assert_eq!(mask.inside_count(), 1);
    }

    #[test]
    fn test_label_from_path() {
        assert_eq!(label_from_path(Path::new("/data/tile_07.tif")), "tile_07");
        assert_eq!(label_from_path(Path::new("scene.mask.json")), "scene.mask");
    }
}
