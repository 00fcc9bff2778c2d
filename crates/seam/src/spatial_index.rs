//! Broad-phase overlap detection using an R*-tree over footprint bounds.
//!
//! Only pairs whose bounding boxes intersect can overlap, so the exact
//! polygon intersection is computed only for the pairs this index returns.

use rstar::{RTree, RTreeObject, AABB};
use seamline_core::Footprint;

/// An entry in the footprint index.
#[derive(Debug, Clone)]
pub struct FootprintEntry {
    /// Index of the footprint in the input list
    pub index: usize,
    /// Axis-aligned bounding box (min_x, min_y, max_x, max_y)
    pub aabb: [f64; 4],
}

impl FootprintEntry {
    /// Creates a new entry.
    pub fn new(index: usize, aabb: [f64; 4]) -> Self {
        Self { index, aabb }
    }

    /// Creates an entry from a footprint, or `None` for an empty polygon.
    pub fn from_footprint(index: usize, footprint: &Footprint) -> Option<Self> {
        let rect = footprint.bounds()?;
        Some(Self::new(
            index,
            [rect.min().x, rect.min().y, rect.max().x, rect.max().y],
        ))
    }
}

impl RTreeObject for FootprintEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.aabb[0], self.aabb[1]], [self.aabb[2], self.aabb[3]])
    }
}

/// R*-tree over footprint bounding boxes.
#[derive(Debug)]
pub struct FootprintIndex {
    tree: RTree<FootprintEntry>,
}

impl FootprintIndex {
    /// Bulk-loads an index over `footprints`.
    pub fn build(footprints: &[Footprint]) -> Self {
        let entries = footprints
            .iter()
            .enumerate()
            .filter_map(|(i, fp)| FootprintEntry::from_footprint(i, fp))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Returns the number of entries in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Finds all entries whose bounding boxes intersect the given box.
    pub fn query_aabb(&self, min: [f64; 2], max: [f64; 2]) -> Vec<&FootprintEntry> {
        let envelope = AABB::from_corners(min, max);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .collect()
    }

    /// Returns every pair `(i, j)`, `i < j`, whose bounding boxes intersect,
    /// in combinations order.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .tree
            .iter()
            .flat_map(|entry| {
                self.query_aabb(
                    [entry.aabb[0], entry.aabb[1]],
                    [entry.aabb[2], entry.aabb[3]],
                )
                .into_iter()
                .filter(move |other| other.index > entry.index)
                .map(move |other| (entry.index, other.index))
            })
            .collect();

        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}
