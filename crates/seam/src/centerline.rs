//! Centerline cut between two overlapping footprints.
//!
//! The cut follows the shortest path through the Voronoi ridge graph of the
//! sampled overlap boundary, from the ridge node nearest the entry point to
//! the node nearest the exit point. Entry and exit are where the two
//! footprint boundaries cross; without crossings, the two sampled boundary
//! points farthest apart are used.
//!
//! The search always produces a line: an empty graph or disconnected
//! endpoints fall back to the straight segment between entry and exit.

use geo::{Coord, LineString, Polygon};
use log::Level;
use seamline_core::{CutSource, GeometryKernel, SeamlineConfig};

use crate::sampler::{canonical_ring, BoundarySampler};
use crate::voronoi::VoronoiGraph;

/// A computed cut line and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Centerline {
    /// The cut polyline (at least two points).
    pub line: LineString<f64>,
    /// Voronoi path or fallback.
    pub source: CutSource,
}

/// Computes centerline cuts for footprint pairs.
#[derive(Debug)]
pub struct CenterlineComputer<'a, K: GeometryKernel> {
    kernel: &'a K,
    config: &'a SeamlineConfig,
}

impl<'a, K: GeometryKernel> CenterlineComputer<'a, K> {
    /// Creates a computer using `kernel` for polygon operations.
    pub fn new(kernel: &'a K, config: &'a SeamlineConfig) -> Self {
        Self { kernel, config }
    }

    fn level(&self) -> Level {
        if self.config.debug {
            Level::Debug
        } else {
            Level::Trace
        }
    }

    /// Computes the cut between `a` and `b`, or `None` when they do not overlap.
    pub fn compute(&self, a: &Polygon<f64>, b: &Polygon<f64>) -> Option<Centerline> {
        let parts = self.kernel.intersection(a, b);
        if parts.len() > 1 {
            log::warn!(
                "Overlap has {} disjoint parts, cutting along the largest",
                parts.len()
            );
        }

        let overlap = parts.into_iter().fold(None, |best: Option<(f64, Polygon<f64>)>, p| {
            let area = self.kernel.area(&p);
            match best {
                Some((best_area, _)) if best_area >= area => best,
                _ => Some((area, p)),
            }
        })?;

        Some(self.compute_for_overlap(a, b, &overlap.1))
    }

    /// Computes the cut between `a` and `b` given their (non-empty) overlap.
    pub fn compute_for_overlap(
        &self,
        a: &Polygon<f64>,
        b: &Polygon<f64>,
        overlap: &Polygon<f64>,
    ) -> Centerline {
        let overlap = canonical_ring(overlap);
        let samples = BoundarySampler::new(self.config.dist_min).sample(&overlap);

        let (graph, stats) = VoronoiGraph::build_with_stats(
            &samples,
            self.config.min_cut_length,
            self.config.node_merge_tolerance,
        );
        log::log!(
            self.level(),
            "Graph: {} nodes, {} edges from {} samples ({} ridges outside hull, {} too short)",
            graph.node_count(),
            graph.edge_count(),
            samples.len(),
            stats.outside_hull,
            stats.too_short
        );

        let crossings = self.kernel.boundary_intersection(a, b);
        let fallback_point = overlap
            .exterior()
            .0
            .first()
            .copied()
            .unwrap_or(Coord { x: 0.0, y: 0.0 });
        let (u, v) = endpoints(&crossings, &samples).unwrap_or((fallback_point, fallback_point));

        let (Some(start), Some(end)) = (graph.nearest_node(u), graph.nearest_node(v)) else {
            log::debug!("Empty Voronoi graph, using fallback straight line");
            return Centerline {
                line: straight(u, v),
                source: CutSource::EmptyGraphFallback,
            };
        };
        log::log!(
            self.level(),
            "Snapped start={:?}, end={:?}",
            graph.position(start),
            graph.position(end)
        );

        match graph.shortest_path(start, end) {
            Some((_, path)) => Centerline {
                line: anchored(u, path, v),
                source: CutSource::VoronoiPath,
            },
            None => {
                log::debug!("No path found; fallback straight line used");
                Centerline {
                    line: straight(u, v),
                    source: CutSource::NoPathFallback,
                }
            }
        }
    }
}

/// Picks the entry and exit points of the cut.
///
/// One boundary crossing serves as both points; with two or more, the first
/// two are used. Without crossings, the farthest pair of samples is used.
pub fn endpoints(
    crossings: &[Coord<f64>],
    samples: &[Coord<f64>],
) -> Option<(Coord<f64>, Coord<f64>)> {
    match crossings {
        [single] => Some((*single, *single)),
        [first, second, ..] => Some((*first, *second)),
        [] => farthest_pair(samples),
    }
}

/// Returns the first pair of points (in sample order) with maximum squared distance.
pub fn farthest_pair(points: &[Coord<f64>]) -> Option<(Coord<f64>, Coord<f64>)> {
    let mut best: Option<(Coord<f64>, Coord<f64>, f64)> = None;

    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            let d = (p.x - q.x).powi(2) + (p.y - q.y).powi(2);
            if best.map_or(true, |(_, _, bd)| d > bd) {
                best = Some((*p, *q, d));
            }
        }
    }

    match best {
        Some((p, q, _)) => Some((p, q)),
        None => points.first().map(|p| (*p, *p)),
    }
}

fn straight(u: Coord<f64>, v: Coord<f64>) -> LineString<f64> {
    LineString(vec![u, v])
}

/// Joins the entry point, the graph path and the exit point.
fn anchored(u: Coord<f64>, path: Vec<Coord<f64>>, v: Coord<f64>) -> LineString<f64> {
    let mut coords = Vec::with_capacity(path.len() + 2);
    if path.first() != Some(&u) {
        coords.push(u);
    }
    coords.extend(path);
    if coords.last() != Some(&v) {
        coords.push(v);
    }
    if coords.len() == 1 {
        coords.push(coords[0]);
    }
    LineString(coords)
}
