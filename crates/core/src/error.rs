//! Error types for seamline computation.

use thiserror::Error;

/// Errors raised by the seamline pipeline.
///
/// Recoverable conditions inside the centerline search (an empty Voronoi
/// graph, a graph without a path between the snapped endpoints) are not
/// errors: they take the straight-line fallback and are only logged.
#[derive(Debug, Error)]
pub enum Error {
    /// A mask produced no footprint polygon.
    #[error("No valid footprint polygon found: {0}")]
    NoFootprintFound(String),

    /// A footprint polygon is malformed (too few vertices, zero area).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A configuration value lies outside its domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A mask is inconsistent with its declared shape.
    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    /// A file could not be decoded or encoded.
    #[error("Format error: {0}")]
    Format(String),

    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for seamline operations.
pub type Result<T> = std::result::Result<T, Error>;
