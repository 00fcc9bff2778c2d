//! Seamline result representation.

use crate::geometry::{Cut, SegmentedFootprint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of a seamline computation over a set of footprints.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeamlineResult {
    /// One segmented footprint per input footprint, in input order.
    pub segmented: Vec<SegmentedFootprint>,

    /// Cuts in pair enumeration order.
    pub cuts: Vec<Cut>,

    /// Number of footprint pairs enumerated.
    pub pairs_examined: usize,

    /// Number of pairs with a non-empty overlap.
    pub overlapping_pairs: usize,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl SeamlineResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            segmented: Vec::new(),
            cuts: Vec::new(),
            pairs_examined: 0,
            overlapping_pairs: 0,
            computation_time_ms: 0,
        }
    }

    /// Returns the number of cuts that took a straight-line fallback.
    pub fn fallback_count(&self) -> usize {
        self.cuts.iter().filter(|c| c.source.is_fallback()).count()
    }

    /// Returns the summed area of all segmented footprints.
    pub fn total_area(&self) -> f64 {
        self.segmented.iter().map(|s| s.area()).sum()
    }

    /// Returns a short summary of this result.
    pub fn summary(&self) -> SeamlineSummary {
        SeamlineSummary {
            footprints: self.segmented.len(),
            cuts: self.cuts.len(),
            fallbacks: self.fallback_count(),
            pairs_examined: self.pairs_examined,
            overlapping_pairs: self.overlapping_pairs,
            total_area: self.total_area(),
            computation_time_ms: self.computation_time_ms,
        }
    }
}

impl Default for SeamlineResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a seamline result, suitable for reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeamlineSummary {
    /// Number of output footprints.
    pub footprints: usize,
    /// Number of cuts.
    pub cuts: usize,
    /// Number of straight-line fallback cuts.
    pub fallbacks: usize,
    /// Number of pairs enumerated.
    pub pairs_examined: usize,
    /// Number of overlapping pairs.
    pub overlapping_pairs: usize,
    /// Summed output area.
    pub total_area: f64,
    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}
