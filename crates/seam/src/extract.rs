//! Footprint polygon extraction from raster masks.
//!
//! Each run of consecutive inside cells in a row becomes one rectangle in
//! world coordinates. The rectangles are unioned with `i_overlay` and the
//! largest resulting outer contour is the footprint.

use geo::{Area, Coord, LineString, Polygon};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use seamline_core::{Error, Footprint, Mask, PolygonExtractor, Result};

/// Extracts the largest connected footprint polygon from a mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskPolygonExtractor;

impl MaskPolygonExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl PolygonExtractor for MaskPolygonExtractor {
    fn extract(&self, label: &str, mask: &Mask) -> Result<Footprint> {
        let runs = row_runs(mask);
        if runs.is_empty() {
            return Err(Error::NoFootprintFound(label.to_string()));
        }
        log::debug!("Mask '{}': {} row runs", label, runs.len());

        let clip: Vec<Vec<[f64; 2]>> = Vec::new();
        let shapes = runs.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
        if shapes.len() > 1 {
            log::debug!(
                "Mask '{}' has {} separate regions, keeping the largest",
                label,
                shapes.len()
            );
        }

        let mut best: Option<(f64, Polygon<f64>)> = None;
        for shape in shapes {
            let Some(outer) = shape.into_iter().next() else {
                continue;
            };
            if outer.len() < 3 {
                continue;
            }
            let polygon = Polygon::new(
                LineString(outer.into_iter().map(|[x, y]| Coord { x, y }).collect()),
                Vec::new(),
            );
            let area = polygon.unsigned_area();
            if area > 0.0 && best.as_ref().map_or(true, |(a, _)| area > *a) {
                best = Some((area, polygon));
            }
        }

        best.map(|(_, polygon)| Footprint::new(label, polygon))
            .ok_or_else(|| Error::NoFootprintFound(label.to_string()))
    }
}

/// Returns one world-space quadrilateral per run of inside cells.
fn row_runs(mask: &Mask) -> Vec<Vec<[f64; 2]>> {
    let transform = mask.transform();
    let corner = |col: usize, row: usize| {
        let (x, y) = transform.apply(col as f64, row as f64);
        [x, y]
    };

    let mut runs = Vec::new();
    for row in 0..mask.height() {
        let mut col = 0;
        while col < mask.width() {
            if !mask.is_inside(col, row) {
                col += 1;
                continue;
            }
            let start = col;
            while col < mask.width() && mask.is_inside(col, row) {
                col += 1;
            }
            runs.push(vec![
                corner(start, row),
                corner(start, row + 1),
                corner(col, row + 1),
                corner(col, row),
            ]);
        }
    }
    runs
}
