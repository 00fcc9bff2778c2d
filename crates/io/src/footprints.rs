//! Footprint collection files.
//!
//! Lets the pipeline start from polygons instead of masks, and lets mask
//! extraction be saved for later runs:
//!
//! ```json
//! {
//!   "crs": "EPSG:32633",
//!   "footprints": [
//!     { "image": "tile_01", "polygon": [[0, 0], [10, 0], [10, 10], [0, 10]] }
//!   ]
//! }
//! ```
//!
//! Polygon rings may be given open or closed.

use std::fs;
use std::path::Path;

use geo::Coord;
use seamline_core::Footprint;
use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// One footprint record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintRecord {
    /// Image label
    pub image: String,
    /// Exterior ring vertices, open or closed
    pub polygon: Vec<[f64; 2]>,
}

impl FootprintRecord {
    /// Creates a record from a footprint's exterior ring (left open).
    pub fn from_footprint(footprint: &Footprint) -> Self {
        let mut polygon: Vec<[f64; 2]> = footprint
            .polygon
            .exterior()
            .coords()
            .map(|c| [c.x, c.y])
            .collect();
        if polygon.len() > 1 && polygon.first() == polygon.last() {
            polygon.pop();
        }
        Self {
            image: footprint.label.clone(),
            polygon,
        }
    }

    /// Converts the record back into a footprint.
    pub fn to_footprint(&self) -> Footprint {
        let vertices = self.polygon.iter().map(|&[x, y]| (x, y)).collect();
        Footprint::from_vertices(self.image.clone(), vertices)
    }
}

/// A set of footprints with an optional CRS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
    pub footprints: Vec<FootprintRecord>,
}

impl FootprintCollection {
    /// Builds a collection from footprints.
    pub fn new(crs: Option<String>, footprints: &[Footprint]) -> Self {
        Self {
            crs,
            footprints: footprints.iter().map(FootprintRecord::from_footprint).collect(),
        }
    }

    /// Loads a collection from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, IoError> {
        let content = fs::read_to_string(path)?;
        let collection: Self = serde_json::from_str(&content)?;
        collection.check_records()?;
        log::debug!(
            "Read {} footprints from {}",
            collection.footprints.len(),
            path.display()
        );
        Ok(collection)
    }

    /// Rejects records whose polygon cannot form a ring.
    pub fn check_records(&self) -> Result<(), IoError> {
        match self.footprints.iter().find(|r| r.polygon.len() < 3) {
            Some(record) => Err(IoError::Invalid(format!(
                "footprint '{}' has {} vertices, at least 3 are required",
                record.image,
                record.polygon.len()
            ))),
            None => Ok(()),
        }
    }

    /// Saves the collection as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Returns the footprints in file order.
    pub fn to_footprints(&self) -> Vec<Footprint> {
        self.footprints.iter().map(FootprintRecord::to_footprint).collect()
    }
}

/// Converts a coordinate to a JSON position.
pub(crate) fn position(c: &Coord<f64>) -> [f64; 2] {
    [c.x, c.y]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_collection() {
        let json = r#"{
            "crs": "EPSG:3857",
            "footprints": [
                {"image": "a", "polygon": [[0, 0], [2, 0], [2, 1], [0, 1]]},
                {"image": "b", "polygon": [[1, 0], [3, 0], [3, 1], [1, 1], [1, 0]]}
            ]
        }"#;
        let collection: FootprintCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.crs.as_deref(), Some("EPSG:3857"));

        let footprints = collection.to_footprints();
        assert_eq!(footprints.len(), 2);
        assert_eq!(footprints[0].label, "a");
        assert_relative_eq!(footprints[0].area(), 2.0);
        assert_relative_eq!(footprints[1].area(), 2.0);
    }

    #[test]
    fn test_record_drops_closing_vertex() {
        let footprint = Footprint::rectangle("r", 0.0, 0.0, 1.0, 1.0);
        let record = FootprintRecord::from_footprint(&footprint);
        assert_eq!(record.polygon.len(), 4);
        assert_eq!(record.to_footprint().polygon, footprint.polygon);
    }

    #[test]
    fn test_short_ring_rejected() {
        let json = r#"{"footprints": [{"image": "line", "polygon": [[0, 0], [1, 1]]}]}"#;
        let collection: FootprintCollection = serde_json::from_str(json).unwrap();
        assert!(matches!(
            collection.check_records(),
            Err(IoError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_crs_defaults_to_none() {
        let collection: FootprintCollection =
            serde_json::from_str(r#"{"footprints": []}"#).unwrap();
        assert!(collection.crs.is_none());
        assert!(collection.footprints.is_empty());
    }
}
