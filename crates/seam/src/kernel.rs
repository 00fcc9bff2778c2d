//! Geometry kernel backed by the `geo` and `i_overlay` crates.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, BooleanOps, Coord, Intersects, Line, LineString, Polygon};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::float::slice::FloatSlice;
use seamline_core::robust::point_on_segment;
use seamline_core::GeometryKernel;

/// Points closer than this (relative to the coordinate magnitude) are
/// reported once by [`GeoKernel::boundary_intersection`].
const DEDUP_EPSILON: f64 = 1e-12;

/// [`GeometryKernel`] implementation on top of `geo` boolean operations and
/// `i_overlay` polygon slicing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoKernel;

impl GeoKernel {
    /// Creates a new kernel.
    pub fn new() -> Self {
        Self
    }
}

impl GeometryKernel for GeoKernel {
    fn intersection(&self, a: &Polygon<f64>, b: &Polygon<f64>) -> Vec<Polygon<f64>> {
        a.intersection(b)
            .0
            .into_iter()
            .filter(|p| p.unsigned_area() > 0.0)
            .collect()
    }

    /// Returns the isolated crossings of the two exterior rings, sorted by
    /// `(x, y)` with near-duplicates removed.
    ///
    /// Crossings lying on a shared collinear stretch are dropped. Because the
    /// order is lexicographic rather than along either ring, the first two
    /// points can be neighbouring crossings on the same side of the overlap
    /// (two bars forming a plus sign, for instance), in which case a cut
    /// through them does not fully separate the footprints.
    fn boundary_intersection(&self, a: &Polygon<f64>, b: &Polygon<f64>) -> Vec<Coord<f64>> {
        let mut points: Vec<Coord<f64>> = Vec::new();
        let mut shared: Vec<Line<f64>> = Vec::new();

        for la in a.exterior().lines() {
            for lb in b.exterior().lines() {
                match line_intersection(la, lb) {
                    Some(LineIntersection::SinglePoint { intersection, .. }) => {
                        points.push(intersection)
                    }
                    Some(LineIntersection::Collinear { intersection }) => {
                        if intersection.start == intersection.end {
                            points.push(intersection.start);
                        } else {
                            shared.push(intersection);
                        }
                    }
                    None => {}
                }
            }
        }

        // Points on a shared stretch of boundary belong to a line component.
        points.retain(|p| {
            !shared
                .iter()
                .any(|s| point_on_segment(p.x_y(), s.start.x_y(), s.end.x_y()))
        });

        points.sort_by(|p, q| {
            p.x.partial_cmp(&q.x)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(p.y.partial_cmp(&q.y).unwrap_or(std::cmp::Ordering::Equal))
        });
        points.dedup_by(|p, q| nearly_equal(*p, *q));
        points
    }

    fn area(&self, polygon: &Polygon<f64>) -> f64 {
        polygon.unsigned_area()
    }

    fn intersects(&self, polygon: &Polygon<f64>, line: &LineString<f64>) -> bool {
        polygon.intersects(line)
    }

    fn split(&self, polygon: &Polygon<f64>, line: &LineString<f64>) -> Vec<Polygon<f64>> {
        let mut shape = to_contour(polygon.exterior());
        // geo rings are explicitly closed, i_overlay contours are not.
        shape.pop();

        let path = to_contour(line);
        if shape.len() < 3 || path.len() < 2 {
            return vec![polygon.clone()];
        }

        let pieces: Vec<Polygon<f64>> = shape
            .slice_by(&path, FillRule::NonZero)
            .into_iter()
            .filter_map(|mut contours| {
                if contours.is_empty() {
                    return None;
                }
                let exterior = to_linestring(contours.swap_remove(0));
                let piece = Polygon::new(exterior, Vec::new());
                (piece.unsigned_area() > 0.0).then_some(piece)
            })
            .collect();

        if pieces.is_empty() {
            vec![polygon.clone()]
        } else {
            pieces
        }
    }
}

fn nearly_equal(p: Coord<f64>, q: Coord<f64>) -> bool {
    let scale = p.x.abs().max(p.y.abs()).max(1.0);
    (p.x - q.x).abs() <= DEDUP_EPSILON * scale && (p.y - q.y).abs() <= DEDUP_EPSILON * scale
}

fn to_contour(line_string: &LineString<f64>) -> Vec<[f64; 2]> {
    line_string.coords().map(|c| [c.x, c.y]).collect()
}

fn to_linestring(points: Vec<[f64; 2]>) -> LineString<f64> {
    LineString(
        points
            .into_iter()
            .map(|pt| Coord { x: pt[0], y: pt[1] })
            .collect(),
    )
}
