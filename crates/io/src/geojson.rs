//! GeoJSON output of segmented footprints.

use std::fs;
use std::path::Path;

use seamline_core::{Result, SeamlineConfig, SegmentedFootprint, VectorWriter};
use serde_json::{json, Map, Value};

use crate::error::IoError;
use crate::footprints::position;

/// Writes segmented footprints as a GeoJSON FeatureCollection.
///
/// The collection is named after the layer and carries the CRS as a named
/// CRS member when one is known. Each footprint becomes a Polygon feature
/// whose only property holds the image label.
#[derive(Debug, Clone)]
pub struct GeoJsonWriter {
    layer_name: String,
    image_field_name: String,
}

impl Default for GeoJsonWriter {
    fn default() -> Self {
        Self {
            layer_name: "seamlines".to_string(),
            image_field_name: "image".to_string(),
        }
    }
}

impl GeoJsonWriter {
    /// Creates a writer with the default layer (`seamlines`) and field (`image`) names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes layer and field names from a configuration.
    pub fn from_config(config: &SeamlineConfig) -> Self {
        Self {
            layer_name: config.layer_name.clone(),
            image_field_name: config.image_field_name.clone(),
        }
    }

    /// Sets the layer name.
    pub fn with_layer_name(mut self, name: impl Into<String>) -> Self {
        self.layer_name = name.into();
        self
    }

    /// Sets the attribute holding the image label.
    pub fn with_image_field_name(mut self, name: impl Into<String>) -> Self {
        self.image_field_name = name.into();
        self
    }

    /// Builds the FeatureCollection document.
    pub fn to_value(&self, crs: Option<&str>, footprints: &[SegmentedFootprint]) -> Value {
        let features: Vec<Value> = footprints.iter().map(|fp| self.feature(fp)).collect();

        let mut collection = Map::new();
        collection.insert("type".into(), json!("FeatureCollection"));
        collection.insert("name".into(), json!(self.layer_name));
        if let Some(crs) = crs {
            collection.insert(
                "crs".into(),
                json!({ "type": "name", "properties": { "name": crs } }),
            );
        }
        collection.insert("features".into(), Value::Array(features));
        Value::Object(collection)
    }

    fn feature(&self, footprint: &SegmentedFootprint) -> Value {
        let mut properties = Map::new();
        properties.insert(self.image_field_name.clone(), json!(footprint.label));

        let ring: Vec<[f64; 2]> = footprint.polygon.exterior().coords().map(position).collect();
        json!({
            "type": "Feature",
            "properties": properties,
            "geometry": {
                "type": "Polygon",
                "coordinates": [ring],
            },
        })
    }
}

impl VectorWriter for GeoJsonWriter {
    fn write(
        &self,
        path: &Path,
        crs: Option<&str>,
        footprints: &[SegmentedFootprint],
    ) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_value(crs, footprints))
            .map_err(IoError::from)?;
        fs::write(path, json).map_err(IoError::from)?;
        log::info!(
            "Wrote {} features to {} (layer '{}')",
            footprints.len(),
            path.display(),
            self.layer_name
        );
        Ok(())
    }
}
