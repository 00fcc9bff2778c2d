//! # Seamline Seam
//!
//! Voronoi centerline seamlines between overlapping image footprints.
//!
//! For every pair of overlapping footprints, the overlap boundary is sampled,
//! its Voronoi diagram is reduced to the ridges inside the overlap, and the
//! shortest ridge path between the points where the footprint boundaries
//! cross becomes the cut. Each footprint is then split along every cut that
//! crosses it, keeping the largest piece.
//!
//! ## Quick Start
//!
//! ```rust
//! use seamline_core::{Footprint, SeamlineConfig};
//! use seamline_seam::SeamlineOrchestrator;
//!
//! let footprints = vec![
//!     Footprint::rectangle("a", 0.0, 0.0, 1.0, 1.0),
//!     Footprint::rectangle("b", 0.5, 0.0, 1.5, 1.0),
//! ];
//!
//! let config = SeamlineConfig::new().with_dist_min(0.1);
//! let result = SeamlineOrchestrator::new(config).compute(&footprints).unwrap();
//!
//! for seg in &result.segmented {
//!     println!("{}: area {:.3}", seg.label, seg.area());
//! }
//! ```
//!
//! ## Features
//!
//! - `parallel`: compute cuts and segment footprints on the rayon pool
//! - `serde`: serializable configuration and results

pub mod centerline;
pub mod extract;
pub mod kernel;
pub mod sampler;
pub mod seamline;
pub mod segment;
pub mod spatial_index;
pub mod voronoi;

pub use centerline::{Centerline, CenterlineComputer};
pub use extract::MaskPolygonExtractor;
pub use kernel::GeoKernel;
pub use sampler::BoundarySampler;
pub use seamline::{compute_seamlines, SeamlineOrchestrator};
pub use segment::PolygonSegmenter;
pub use spatial_index::FootprintIndex;
pub use voronoi::VoronoiGraph;

// Re-export core types
pub use seamline_core::{
    Cut, CutSource, Error, Footprint, GeometryKernel, Result, SeamlineConfig, SeamlineResult,
    SegmentedFootprint,
};
