//! Core geometry types and the geometry kernel trait.

use geo::{Area, BoundingRect, Coord, LineString, Polygon, Rect};

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Label identifying the source image of a footprint.
pub type ImageLabel = String;

/// Geometry operations the seamline algorithms rely on.
///
/// Keeps the sampling, graph and segmentation code independent of the
/// geometry engine doing the polygon clipping.
pub trait GeometryKernel: Send + Sync {
    /// Returns the polygonal parts of `a ∩ b`. Empty when they do not overlap.
    fn intersection(&self, a: &Polygon<f64>, b: &Polygon<f64>) -> Vec<Polygon<f64>>;

    /// Returns the isolated points where the boundaries of `a` and `b` meet.
    ///
    /// Points covered by a shared collinear stretch of boundary are not
    /// reported. The result is sorted lexicographically and deduplicated, so
    /// its first two points are not necessarily on opposite sides of the
    /// overlap.
    fn boundary_intersection(&self, a: &Polygon<f64>, b: &Polygon<f64>) -> Vec<Coord<f64>>;

    /// Returns the unsigned area of a polygon.
    fn area(&self, polygon: &Polygon<f64>) -> f64;

    /// Returns true if the polygon and the line share at least one point.
    fn intersects(&self, polygon: &Polygon<f64>, line: &LineString<f64>) -> bool;

    /// Splits a polygon along a line into its pieces.
    ///
    /// A line that does not cross the polygon yields the polygon itself.
    fn split(&self, polygon: &Polygon<f64>, line: &LineString<f64>) -> Vec<Polygon<f64>>;
}

/// The footprint (edge-matching polygon) of one input image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    /// Source image label.
    pub label: ImageLabel,

    /// Exterior ring of the footprint. Holes are not tracked.
    pub polygon: Polygon<f64>,
}

impl Footprint {
    /// Creates a footprint, dropping any interior rings of `polygon`.
    pub fn new(label: impl Into<ImageLabel>, polygon: Polygon<f64>) -> Self {
        let (exterior, _) = polygon.into_inner();
        Self {
            label: label.into(),
            polygon: Polygon::new(exterior, Vec::new()),
        }
    }

    /// Creates a footprint from (x, y) vertices. The ring is closed automatically.
    pub fn from_vertices(label: impl Into<ImageLabel>, vertices: Vec<(f64, f64)>) -> Self {
        let exterior = LineString::from(
            vertices
                .into_iter()
                .map(|(x, y)| Coord { x, y })
                .collect::<Vec<_>>(),
        );
        Self::new(label, Polygon::new(exterior, Vec::new()))
    }

    /// Creates an axis-aligned rectangular footprint.
    pub fn rectangle(
        label: impl Into<ImageLabel>,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self::from_vertices(
            label,
            vec![(min_x, min_y), (max_x, min_y), (max_x, max_y), (min_x, max_y)],
        )
    }

    /// Returns the unsigned area.
    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    /// Returns the bounding rectangle, or `None` for an empty ring.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.polygon.bounding_rect()
    }

    /// Rejects footprints the pipeline cannot process.
    pub fn validate(&self) -> Result<()> {
        let ring = self.polygon.exterior();

        if ring.coords().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "Footprint '{}' has non-finite coordinates",
                self.label
            )));
        }

        let mut distinct: Vec<Coord<f64>> = Vec::new();
        for c in ring.coords() {
            if !distinct.contains(c) {
                distinct.push(*c);
            }
        }
        if distinct.len() < 3 {
            return Err(Error::InvalidGeometry(format!(
                "Footprint '{}' must have at least 3 distinct vertices",
                self.label
            )));
        }

        if self.area() <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "Footprint '{}' has zero area",
                self.label
            )));
        }

        Ok(())
    }
}

/// How a cut line was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CutSource {
    /// Shortest path through the Voronoi graph of the overlap.
    VoronoiPath,
    /// Straight segment because the Voronoi graph had no nodes.
    EmptyGraphFallback,
    /// Straight segment because the snapped endpoints were not connected.
    NoPathFallback,
}

impl CutSource {
    /// Returns true if the cut is a straight-line fallback.
    pub fn is_fallback(self) -> bool {
        !matches!(self, Self::VoronoiPath)
    }
}

/// A seam line dividing the overlap of two footprints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cut {
    /// Index of the first footprint of the pair.
    pub first: usize,

    /// Index of the second footprint of the pair.
    pub second: usize,

    /// The cut polyline.
    pub line: LineString<f64>,

    /// How the line was obtained.
    pub source: CutSource,
}

impl Cut {
    /// Creates a cut for the footprint pair `(first, second)`.
    pub fn new(first: usize, second: usize, line: LineString<f64>, source: CutSource) -> Self {
        Self {
            first,
            second,
            line,
            source,
        }
    }
}

/// A footprint after all relevant cuts have been applied.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentedFootprint {
    /// Source image label.
    pub label: ImageLabel,

    /// The retained polygon.
    pub polygon: Polygon<f64>,

    /// Number of cuts that actually split the footprint.
    pub cuts_applied: usize,
}

impl SegmentedFootprint {
    /// Returns the unsigned area of the retained polygon.
    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }
}
