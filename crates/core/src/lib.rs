//! # Seamline Core
//!
//! Core types, traits and configuration for seamline computation.
//!
//! A seamline divides the overlap of two image footprints along a
//! geometry-aware centerline so that every image of a mosaic claims a
//! disjoint region. This crate holds what the algorithm crate and the I/O
//! front-ends share.
//!
//! ## Core Components
//!
//! - **Data model**: [`Footprint`], [`Cut`], [`SegmentedFootprint`], [`SeamlineResult`]
//! - **Geometry kernel**: [`GeometryKernel`] - the polygon operations the algorithms rely on
//! - **Collaborators**: [`MaskReader`], [`PolygonExtractor`], [`VectorWriter`]
//! - **Predicates**: [`robust`] - exact orientation tests
//!
//! ## Configuration
//!
//! ```rust
//! use seamline_core::SeamlineConfig;
//!
//! let config = SeamlineConfig::new()
//!     .with_dist_min(2.5)
//!     .with_min_cut_length(0.0)
//!     .with_debug(true);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod result;
pub mod robust;

// Re-exports
pub use config::SeamlineConfig;
pub use error::{Error, Result};
pub use geometry::{Cut, CutSource, Footprint, GeometryKernel, ImageLabel, SegmentedFootprint};
pub use io::{label_from_path, GeoTransform, Mask, MaskReader, PolygonExtractor, VectorWriter};
pub use result::{SeamlineResult, SeamlineSummary};
