//! Seamline pipeline over a set of footprints.
//!
//! 1. Candidate pairs come from an R*-tree over footprint bounds and are
//!    processed in combinations order; each overlapping pair yields one cut.
//! 2. Every footprint is reduced by the cuts that cross it, in cut order.
//! 3. One segmented footprint is emitted per input footprint, in input order.
//!
//! With the `parallel` feature both passes run on the rayon pool; collection
//! preserves order so the output matches the sequential run exactly.

use std::time::Instant;

use log::Level;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use seamline_core::{
    Cut, Footprint, GeometryKernel, Result, SeamlineConfig, SeamlineResult, SegmentedFootprint,
};

use crate::centerline::CenterlineComputer;
use crate::kernel::GeoKernel;
use crate::segment::PolygonSegmenter;
use crate::spatial_index::FootprintIndex;

/// Computes seamlines and segments footprints.
///
/// # Example
///
/// ```rust
/// use seamline_core::{Footprint, SeamlineConfig};
/// use seamline_seam::SeamlineOrchestrator;
///
/// let footprints = vec![
///     Footprint::rectangle("left", 0.0, 0.0, 1.0, 1.0),
///     Footprint::rectangle("right", 0.5, 0.0, 1.5, 1.0),
/// ];
/// let orchestrator = SeamlineOrchestrator::new(SeamlineConfig::new().with_dist_min(0.1));
/// let result = orchestrator.compute(&footprints).unwrap();
/// assert_eq!(result.segmented.len(), 2);
/// assert_eq!(result.cuts.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SeamlineOrchestrator<K: GeometryKernel = GeoKernel> {
    config: SeamlineConfig,
    kernel: K,
}

impl SeamlineOrchestrator<GeoKernel> {
    /// Creates an orchestrator with the default geometry kernel.
    pub fn new(config: SeamlineConfig) -> Self {
        Self::with_kernel(config, GeoKernel::new())
    }
}

impl Default for SeamlineOrchestrator<GeoKernel> {
    fn default() -> Self {
        Self::new(SeamlineConfig::default())
    }
}

impl<K: GeometryKernel> SeamlineOrchestrator<K> {
    /// Creates an orchestrator using a custom geometry kernel.
    pub fn with_kernel(config: SeamlineConfig, kernel: K) -> Self {
        Self { config, kernel }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SeamlineConfig {
        &self.config
    }

    fn level(&self) -> Level {
        if self.config.debug {
            Level::Debug
        } else {
            Level::Trace
        }
    }

    /// Runs the full pipeline.
    ///
    /// Fails with `InvalidConfig` or `InvalidGeometry` before any geometry is
    /// processed; the cut search itself never fails.
    pub fn compute(&self, footprints: &[Footprint]) -> Result<SeamlineResult> {
        let start = Instant::now();

        self.config.validate()?;
        for footprint in footprints {
            footprint.validate()?;
            log::log!(
                self.level(),
                "EMP '{}': area={:.3}, bounds={:?}",
                footprint.label,
                footprint.area(),
                footprint.bounds()
            );
        }

        let (cuts, pairs_examined) = self.compute_cuts(footprints);
        let segmented = self.segment_all(footprints, &cuts);

        let mut result = SeamlineResult::new();
        result.overlapping_pairs = cuts.len();
        result.pairs_examined = pairs_examined;
        result.cuts = cuts;
        result.segmented = segmented;
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "Seamlines: {} footprints, {} cuts ({} fallback) in {} ms",
            result.segmented.len(),
            result.cuts.len(),
            result.fallback_count(),
            result.computation_time_ms
        );

        Ok(result)
    }

    /// Computes one cut per overlapping footprint pair, in combinations order.
    ///
    /// Returns the cuts and the number of candidate pairs examined.
    pub fn compute_cuts(&self, footprints: &[Footprint]) -> (Vec<Cut>, usize) {
        let pairs = FootprintIndex::build(footprints).candidate_pairs();
        log::debug!(
            "{} candidate pairs out of {} combinations",
            pairs.len(),
            footprints.len() * footprints.len().saturating_sub(1) / 2
        );

        let computer = CenterlineComputer::new(&self.kernel, &self.config);
        let cut_for = |&(i, j): &(usize, usize)| -> Option<Cut> {
            let (a, b) = (&footprints[i], &footprints[j]);
            let centerline = computer.compute(&a.polygon, &b.polygon)?;
            log::debug!(
                "Cut '{}' / '{}': {} points ({:?})",
                a.label,
                b.label,
                centerline.line.0.len(),
                centerline.source
            );
            Some(Cut::new(i, j, centerline.line, centerline.source))
        };

        #[cfg(feature = "parallel")]
        let cuts: Vec<Option<Cut>> = pairs.par_iter().map(cut_for).collect();
        #[cfg(not(feature = "parallel"))]
        let cuts: Vec<Option<Cut>> = pairs.iter().map(cut_for).collect();

        (cuts.into_iter().flatten().collect(), pairs.len())
    }

    /// Reduces every footprint by the cuts that cross it.
    pub fn segment_all(&self, footprints: &[Footprint], cuts: &[Cut]) -> Vec<SegmentedFootprint> {
        let segmenter = PolygonSegmenter::new(&self.kernel);
        let segment = |footprint: &Footprint| {
            let segmented = segmenter.segment(&footprint.label, &footprint.polygon, cuts);
            log::log!(
                self.level(),
                "Segmented '{}': area {:.3} -> {:.3}",
                footprint.label,
                footprint.area(),
                segmented.area()
            );
            segmented
        };

        #[cfg(feature = "parallel")]
        let segmented: Vec<SegmentedFootprint> = footprints.par_iter().map(segment).collect();
        #[cfg(not(feature = "parallel"))]
        let segmented: Vec<SegmentedFootprint> = footprints.iter().map(segment).collect();

        segmented
    }
}

/// Computes seamlines with the default geometry kernel.
pub fn compute_seamlines(
    footprints: &[Footprint],
    config: &SeamlineConfig,
) -> Result<SeamlineResult> {
    SeamlineOrchestrator::new(config.clone()).compute(footprints)
}
