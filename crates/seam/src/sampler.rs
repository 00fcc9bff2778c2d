//! Boundary sampling of overlap polygons.
//!
//! The Voronoi centerline is computed from points spread along the overlap
//! boundary. Each ring segment of length `L` is divided into
//! `n = max(floor(L / dist_min), 1)` equal parts and the `n` segment-start
//! points are emitted, so shared ring vertices are never emitted twice.

use geo::algorithm::orient::{Direction, Orient};
use geo::{Coord, LineString, Polygon};

/// Densifies polygon boundaries into point sets.
#[derive(Debug, Clone, Copy)]
pub struct BoundarySampler {
    dist_min: f64,
}

impl BoundarySampler {
    /// Creates a sampler with the given minimum spacing (must be > 0).
    pub fn new(dist_min: f64) -> Self {
        Self { dist_min }
    }

    /// Returns the sampling spacing.
    pub fn dist_min(&self) -> f64 {
        self.dist_min
    }

    /// Samples the exterior ring of a polygon.
    pub fn sample(&self, polygon: &Polygon<f64>) -> Vec<Coord<f64>> {
        densify_ring(polygon.exterior(), self.dist_min)
    }
}

/// Number of sub-segments a segment of `length` is divided into.
#[inline]
pub fn subdivisions(length: f64, dist_min: f64) -> usize {
    let n = (length / dist_min).floor();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        1
    }
}

/// Samples a closed ring at `dist_min` spacing.
///
/// Emits the start point of every sub-segment; the closing vertex of the
/// ring is not repeated. Zero-length segments contribute their start point.
pub fn densify_ring(ring: &LineString<f64>, dist_min: f64) -> Vec<Coord<f64>> {
    let mut dense = Vec::with_capacity(ring.0.len());

    for segment in ring.0.windows(2) {
        let (p0, p1) = (segment[0], segment[1]);
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let n = subdivisions(dx.hypot(dy), dist_min);

        for j in 0..n {
            let t = j as f64 / n as f64;
            dense.push(Coord {
                x: p0.x + dx * t,
                y: p0.y + dy * t,
            });
        }
    }

    dense
}

/// Puts a polygon's exterior ring in canonical form.
///
/// The ring is oriented counter-clockwise and rotated to start at its
/// lexicographically smallest vertex, so the same region always samples to
/// the same point sequence whatever operand order produced it.
pub fn canonical_ring(polygon: &Polygon<f64>) -> Polygon<f64> {
    let oriented = polygon.orient(Direction::Default);
    let mut coords: Vec<Coord<f64>> = oriented.exterior().0.clone();

    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    if coords.is_empty() {
        return oriented;
    }

    let start = coords
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.x.partial_cmp(&b.x)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    coords.rotate_left(start);

    Polygon::new(LineString(coords), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::polygon;

    #[test]
    fn test_subdivisions() {
        assert_eq!(subdivisions(1.0, 0.1), 10);
        assert_eq!(subdivisions(0.95, 0.1), 9);
        assert_eq!(subdivisions(0.05, 0.1), 1);
        assert_eq!(subdivisions(0.0, 0.1), 1);
    }

    #[test]
    fn test_density_per_segment() {
        // Segment lengths 4 and 3 and 5 with spacing 1.
        let tri = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 3.0)];
        let pts = BoundarySampler::new(1.0).sample(&tri);
        assert_eq!(pts.len(), 4 + 3 + 5);
        assert_eq!(pts[0], Coord { x: 0.0, y: 0.0 });
        assert_relative_eq!(pts[1].x, 1.0);
        assert_eq!(pts[4], Coord { x: 4.0, y: 0.0 });
    }

    #[test]
    fn test_closing_vertex_not_repeated() {
        let sq = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
        let pts = BoundarySampler::new(0.25).sample(&sq);
        assert_eq!(pts.len(), 16);
        let first = pts[0];
        assert_eq!(pts.iter().filter(|p| **p == first).count(), 1);
    }

    #[test]
    fn test_spacing_larger_than_ring() {
        let sq = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)];
        let pts = BoundarySampler::new(100.0).sample(&sq);
        assert_eq!(pts.len(), 4);
    }

    #[test]
    fn test_zero_length_segment() {
        let ring = LineString::from(vec![(0.0, 0.0), (0.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
        let pts = densify_ring(&ring, 1.0);
        assert_eq!(pts.len(), 1 + 2 + 2);
        assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_canonical_ring_independent_of_start_and_orientation() {
        let a = polygon![(x: 1.0, y: 1.0), (x: 0.0, y: 1.0), (x: 0.0, y: 0.0), (x: 1.0, y: 0.0)];
        let b = polygon![(x: 0.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0), (x: 0.0, y: 0.0)];
        let ca = canonical_ring(&a);
        let cb = canonical_ring(&b);
        assert_eq!(ca.exterior(), cb.exterior());
        assert_eq!(ca.exterior().0[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(ca.exterior().0[1], Coord { x: 1.0, y: 0.0 });
    }
}
