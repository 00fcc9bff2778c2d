//! # Seamline IO
//!
//! File formats around the seamline pipeline:
//!
//! - [`JsonMaskReader`]: single-band validity masks with a geotransform and CRS
//! - [`FootprintCollection`]: footprint polygons keyed by image label
//! - [`GeoJsonWriter`]: segmented footprints as a GeoJSON layer
//!
//! Readers and writers implement the [`seamline_core::MaskReader`] and
//! [`seamline_core::VectorWriter`] traits, so their errors surface as
//! [`seamline_core::Error`].

pub mod error;
pub mod footprints;
pub mod geojson;
pub mod mask;

pub use error::IoError;
pub use footprints::{FootprintCollection, FootprintRecord};
pub use geojson::GeoJsonWriter;
pub use mask::{JsonMaskReader, MaskFile};
