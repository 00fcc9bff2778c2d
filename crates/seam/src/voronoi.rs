//! Voronoi ridge graph of a sampled boundary.
//!
//! The Voronoi diagram of points spread along an overlap boundary
//! approximates the medial axis of the overlap: its finite ridges run
//! between the two sides of the region. The ridges are collected into a
//! weighted graph whose shortest paths serve as centerline candidates.
//!
//! # Algorithm
//!
//! 1. **Delaunay**: Triangulate the sample points (`spade`)
//! 2. **Dual**: Every interior Delaunay edge yields a finite Voronoi ridge
//!    between the circumcenters of its two faces; hull edges yield rays,
//!    which are dropped
//! 3. **Clip**: Keep ridges whose endpoints lie within the convex hull of
//!    the samples
//! 4. **Filter**: Keep ridges of length `>= min_cut_length`
//! 5. **Merge**: Endpoints snapping to the same tolerance grid cell become
//!    one node

use std::collections::HashMap;

use geo::{ConvexHull, Coord, MultiPoint, Point};
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use seamline_core::robust::{grid_key, point_in_convex_ring_inclusive};
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Undirected graph of finite Voronoi ridges weighted by their length.
#[derive(Debug, Clone, Default)]
pub struct VoronoiGraph {
    graph: UnGraph<Coord<f64>, f64>,
}

/// Summary counters from building a [`VoronoiGraph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoronoiStats {
    /// Finite ridges in the diagram.
    pub finite_ridges: usize,
    /// Ridges discarded for leaving the convex hull of the samples.
    pub outside_hull: usize,
    /// Ridges discarded for being shorter than the minimum length.
    pub too_short: usize,
}

impl VoronoiGraph {
    /// Builds the ridge graph of `points`.
    ///
    /// `min_cut_length` filters short ridges; `merge_tolerance` is the grid
    /// size under which ridge endpoints are considered the same node.
    pub fn build(points: &[Coord<f64>], min_cut_length: f64, merge_tolerance: f64) -> Self {
        Self::build_with_stats(points, min_cut_length, merge_tolerance).0
    }

    /// Builds the ridge graph and reports what was filtered.
    pub fn build_with_stats(
        points: &[Coord<f64>],
        min_cut_length: f64,
        merge_tolerance: f64,
    ) -> (Self, VoronoiStats) {
        let mut stats = VoronoiStats::default();
        let mut result = Self::default();

        let hull = convex_hull_ring(points);
        if hull.len() < 3 {
            return (result, stats);
        }
        let hull_tolerance = merge_tolerance.max(1e-9 * extent(points));

        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        for p in points {
            if let Err(e) = triangulation.insert(Point2::new(p.x, p.y)) {
                log::warn!("Skipping sample ({}, {}): {:?}", p.x, p.y, e);
            }
        }

        let mut nodes: HashMap<(i64, i64), NodeIndex> = HashMap::new();

        for ridge in triangulation.undirected_voronoi_edges() {
            let [from, to] = ridge.vertices();
            let (Some(from), Some(to)) = (from.position(), to.position()) else {
                continue;
            };
            stats.finite_ridges += 1;

            let from = Coord { x: from.x, y: from.y };
            let to = Coord { x: to.x, y: to.y };

            if !within_hull(from, &hull, hull_tolerance) || !within_hull(to, &hull, hull_tolerance)
            {
                stats.outside_hull += 1;
                continue;
            }

            let length = (to.x - from.x).hypot(to.y - from.y);
            if length < min_cut_length {
                stats.too_short += 1;
                continue;
            }

            let a = result.node_for(&mut nodes, from, merge_tolerance);
            let b = result.node_for(&mut nodes, to, merge_tolerance);
            if a == b {
                continue;
            }

            match result.graph.find_edge(a, b) {
                Some(edge) => {
                    if let Some(weight) = result.graph.edge_weight_mut(edge) {
                        *weight = weight.min(length);
                    }
                }
                None => {
                    result.graph.add_edge(a, b, length);
                }
            }
        }

        (result, stats)
    }

    fn node_for(
        &mut self,
        nodes: &mut HashMap<(i64, i64), NodeIndex>,
        position: Coord<f64>,
        tolerance: f64,
    ) -> NodeIndex {
        *nodes
            .entry(grid_key(position.x_y(), tolerance))
            .or_insert_with(|| self.graph.add_node(position))
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the position of a node.
    pub fn position(&self, node: NodeIndex) -> Coord<f64> {
        self.graph[node]
    }

    /// Iterates over the edges as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (Coord<f64>, Coord<f64>, f64)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()],
                self.graph[e.target()],
                *e.weight(),
            )
        })
    }

    /// Returns the node nearest to `target`; ties go to the lowest index.
    pub fn nearest_node(&self, target: Coord<f64>) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, f64)> = None;
        for node in self.graph.node_indices() {
            let p = self.graph[node];
            let d = (p.x - target.x).powi(2) + (p.y - target.y).powi(2);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((node, d));
            }
        }
        best.map(|(node, _)| node)
    }

    /// Finds the minimum-weight path between two nodes.
    ///
    /// Returns the total weight and the node positions along the path, or
    /// `None` when `end` is unreachable from `start`.
    pub fn shortest_path(&self, start: NodeIndex, end: NodeIndex) -> Option<(f64, Vec<Coord<f64>>)> {
        let (cost, path) = astar(
            &self.graph,
            start,
            |n| n == end,
            |e| *e.weight(),
            |_| 0.0,
        )?;
        Some((cost, path.into_iter().map(|n| self.graph[n]).collect()))
    }
}

/// Counter-clockwise convex hull of the points, without the closing vertex.
fn convex_hull_ring(points: &[Coord<f64>]) -> Vec<(f64, f64)> {
    if points.len() < 3 {
        return Vec::new();
    }

    let multi: MultiPoint<f64> = points.iter().map(|c| Point::from(*c)).collect();
    let hull = multi.convex_hull();
    let mut ring: Vec<(f64, f64)> = hull.exterior().coords().map(|c| c.x_y()).collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

fn within_hull(p: Coord<f64>, hull: &[(f64, f64)], tolerance: f64) -> bool {
    if point_in_convex_ring_inclusive(p.x_y(), hull) {
        return true;
    }
    let n = hull.len();
    (0..n).any(|i| distance_to_segment(p.x_y(), hull[i], hull[(i + 1) % n]) <= tolerance)
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    (p.0 - cx).hypot(p.1 - cy)
}

fn extent(points: &[Coord<f64>]) -> f64 {
    points
        .iter()
        .fold(0.0_f64, |acc, p| acc.max(p.x.abs()).max(p.y.abs()))
        .max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::densify_ring;
    use approx::assert_relative_eq;
    use geo::LineString;

    fn rectangle_samples(w: f64, h: f64, spacing: f64) -> Vec<Coord<f64>> {
        let ring = LineString::from(vec![(0.0, 0.0), (w, 0.0), (w, h), (0.0, h), (0.0, 0.0)]);
        densify_ring(&ring, spacing)
    }

    #[test]
    fn test_too_few_points_give_empty_graph() {
        let pts = vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }];
        let graph = VoronoiGraph::build(&pts, 0.0, 1e-9);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_collinear_points_give_empty_graph() {
        let pts: Vec<Coord<f64>> = (0..5).map(|i| Coord { x: i as f64, y: 0.0 }).collect();
        let graph = VoronoiGraph::build(&pts, 0.0, 1e-9);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_rectangle_graph_is_inside_hull() {
        let pts = rectangle_samples(4.0, 1.0, 0.25);
        let graph = VoronoiGraph::build(&pts, 0.0, 1e-9);
        assert!(graph.node_count() > 0);
        assert!(graph.edge_count() > 0);

        for (from, to, weight) in graph.edges() {
            for p in [from, to] {
                assert!(p.x >= -1e-6 && p.x <= 4.0 + 1e-6);
                assert!(p.y >= -1e-6 && p.y <= 1.0 + 1e-6);
            }
            assert!(weight >= 0.0);
            assert_relative_eq!(weight, (to.x - from.x).hypot(to.y - from.y), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_min_cut_length_filters_edges() {
        let pts = rectangle_samples(4.0, 1.0, 0.25);
        let (all, all_stats) = VoronoiGraph::build_with_stats(&pts, 0.0, 1e-9);
        let (long, long_stats) = VoronoiGraph::build_with_stats(&pts, 0.2, 1e-9);

        assert!(long.edge_count() <= all.edge_count());
        assert!(long.edges().all(|(_, _, w)| w >= 0.2));
        assert_eq!(all_stats.finite_ridges, long_stats.finite_ridges);
        assert!(long_stats.too_short >= all_stats.too_short);
    }

    #[test]
    fn test_huge_min_cut_length_gives_empty_graph() {
        let pts = rectangle_samples(4.0, 1.0, 0.25);
        let graph = VoronoiGraph::build(&pts, 1e6, 1e-9);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_nearest_node_and_path() {
        let pts = rectangle_samples(4.0, 1.0, 0.25);
        let graph = VoronoiGraph::build(&pts, 0.0, 1e-9);

        let start = graph.nearest_node(Coord { x: 0.0, y: 0.5 }).unwrap();
        let end = graph.nearest_node(Coord { x: 4.0, y: 0.5 }).unwrap();
        let (cost, path) = graph.shortest_path(start, end).unwrap();

        assert!(path.len() >= 2);
        assert_eq!(path[0], graph.position(start));
        assert_eq!(*path.last().unwrap(), graph.position(end));
        let straight = {
            let (a, b) = (path[0], *path.last().unwrap());
            (b.x - a.x).hypot(b.y - a.y)
        };
        assert!(cost + 1e-9 >= straight);
    }

    #[test]
    fn test_path_to_self() {
        let pts = rectangle_samples(2.0, 1.0, 0.5);
        let graph = VoronoiGraph::build(&pts, 0.0, 1e-9);
        let node = graph.nearest_node(Coord { x: 1.0, y: 0.5 }).unwrap();
        let (cost, path) = graph.shortest_path(node, node).unwrap();
        assert_eq!(cost, 0.0);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_merge_tolerance_collapses_nodes() {
        let pts = rectangle_samples(4.0, 1.0, 0.25);
        let fine = VoronoiGraph::build(&pts, 0.0, 1e-9);
        let coarse = VoronoiGraph::build(&pts, 0.0, 0.5);
        assert!(coarse.node_count() <= fine.node_count());
    }

    #[test]
    fn test_within_hull_tolerance() {
        let hull = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert!(within_hull(Coord { x: 1.0 + 1e-12, y: 0.5 }, &hull, 1e-9));
        assert!(!within_hull(Coord { x: 1.1, y: 0.5 }, &hull, 1e-9));
    }
}
