//! Applying cuts to footprint polygons.
//!
//! Each footprint starts from its original polygon. For every cut that
//! touches the current polygon, the polygon is split along the cut and the
//! largest piece is kept. Area never increases.

use geo::{LineString, Polygon};
use seamline_core::{Cut, GeometryKernel, SegmentedFootprint};

/// Reduces polygons by the cuts that cross them.
#[derive(Debug)]
pub struct PolygonSegmenter<'a, K: GeometryKernel> {
    kernel: &'a K,
}

impl<'a, K: GeometryKernel> PolygonSegmenter<'a, K> {
    /// Creates a segmenter using `kernel` for splitting.
    pub fn new(kernel: &'a K) -> Self {
        Self { kernel }
    }

    /// Applies a single cut, returning the largest resulting piece.
    ///
    /// Returns `None` when the line does not split the polygon (it misses
    /// it, or only touches its boundary).
    pub fn apply(&self, polygon: &Polygon<f64>, line: &LineString<f64>) -> Option<Polygon<f64>> {
        if !self.kernel.intersects(polygon, line) {
            return None;
        }

        let pieces = self.kernel.split(polygon, line);
        if pieces.len() <= 1 {
            return None;
        }

        let mut best: Option<(f64, Polygon<f64>)> = None;
        for piece in pieces {
            let area = self.kernel.area(&piece);
            if best.as_ref().map_or(true, |(best_area, _)| area > *best_area) {
                best = Some((area, piece));
            }
        }
        best.map(|(_, p)| p)
    }

    /// Applies `lines` in order, returning the final polygon and the number
    /// of lines that actually split it.
    pub fn apply_all<'l, I>(&self, polygon: &Polygon<f64>, lines: I) -> (Polygon<f64>, usize)
    where
        I: IntoIterator<Item = &'l LineString<f64>>,
    {
        let mut current = polygon.clone();
        let mut applied = 0;

        for line in lines {
            match self.apply(&current, line) {
                Some(piece) => {
                    current = piece;
                    applied += 1;
                }
                None => log::debug!("Cut does not split polygon, skipped"),
            }
        }

        (current, applied)
    }

    /// Segments a footprint with every cut that intersects it, in cut order.
    pub fn segment(&self, label: &str, polygon: &Polygon<f64>, cuts: &[Cut]) -> SegmentedFootprint {
        let (polygon, cuts_applied) = self.apply_all(polygon, cuts.iter().map(|c| &c.line));
        log::trace!("Footprint '{}' reduced by {} cuts", label, cuts_applied);

        SegmentedFootprint {
            label: label.to_string(),
            polygon,
            cuts_applied,
        }
    }
}
