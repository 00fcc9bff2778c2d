//! Configuration for seamline computation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration parameters for seamline computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeamlineConfig {
    /// Spacing between points sampled along an overlap boundary,
    /// in the units of the footprint coordinates. Must be > 0.
    pub dist_min: f64,

    /// Voronoi ridges shorter than this are left out of the centerline graph.
    /// Must be >= 0; 0 keeps every finite ridge.
    pub min_cut_length: f64,

    /// Grid size used to merge numerically close Voronoi vertices into one
    /// graph node. Must be > 0.
    pub node_merge_tolerance: f64,

    /// Emits per-step diagnostics at debug level. No effect on results.
    pub debug: bool,

    /// Name of the attribute holding the image label in the output layer.
    pub image_field_name: String,

    /// Name of the output layer.
    pub layer_name: String,
}

impl Default for SeamlineConfig {
    fn default() -> Self {
        Self {
            dist_min: 10.0,
            min_cut_length: 0.0,
            node_merge_tolerance: 1e-9,
            debug: false,
            image_field_name: "image".to_string(),
            layer_name: "seamlines".to_string(),
        }
    }
}

impl SeamlineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the boundary sampling spacing.
    pub fn with_dist_min(mut self, dist_min: f64) -> Self {
        self.dist_min = dist_min;
        self
    }

    /// Sets the minimum Voronoi ridge length.
    pub fn with_min_cut_length(mut self, length: f64) -> Self {
        self.min_cut_length = length;
        self
    }

    /// Sets the node merge tolerance.
    pub fn with_node_merge_tolerance(mut self, tolerance: f64) -> Self {
        self.node_merge_tolerance = tolerance;
        self
    }

    /// Enables or disables diagnostic logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the output attribute name for image labels.
    pub fn with_image_field_name(mut self, name: impl Into<String>) -> Self {
        self.image_field_name = name.into();
        self
    }

    /// Sets the output layer name.
    pub fn with_layer_name(mut self, name: impl Into<String>) -> Self {
        self.layer_name = name.into();
        self
    }

    /// Checks every parameter against its domain.
    pub fn validate(&self) -> Result<()> {
        if !(self.dist_min.is_finite() && self.dist_min > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "dist_min must be a positive number, got {}",
                self.dist_min
            )));
        }

        if !(self.min_cut_length.is_finite() && self.min_cut_length >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_cut_length must be >= 0, got {}",
                self.min_cut_length
            )));
        }

        if !(self.node_merge_tolerance.is_finite() && self.node_merge_tolerance > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "node_merge_tolerance must be a positive number, got {}",
                self.node_merge_tolerance
            )));
        }

        if self.image_field_name.is_empty() {
            return Err(Error::InvalidConfig(
                "image_field_name must not be empty".to_string(),
            ));
        }

        if self.layer_name.is_empty() {
            return Err(Error::InvalidConfig(
                "layer_name must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
