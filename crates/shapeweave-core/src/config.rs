//! Engine tolerances and sampling resolution.

use serde::{Deserialize, Serialize};

/// Fewest samples per full turn for curved shapes.
pub const MIN_CURVE_SEGMENTS: usize = 64;
/// Most samples per full turn for curved shapes.
pub const MAX_CURVE_SEGMENTS: usize = 128;

/// Tunable parameters for sampling and clipping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Coordinate tolerance for point equality and parallel detection.
    pub epsilon: f64,
    /// Distance under which a point counts as lying on a boundary.
    pub boundary_tolerance: f64,
    /// Decimal places of the grid used to bucket near-coincident points.
    pub snap_decimals: u32,
    /// Samples per full turn for curved shape kinds.
    pub curve_segments: usize,
    /// Boundary walk cap, as a multiple of the total input vertex count.
    pub trace_iteration_factor: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            boundary_tolerance: 1e-7,
            snap_decimals: 7,
            curve_segments: 96,
            trace_iteration_factor: 4,
        }
    }
}

impl EngineConfig {
    /// Clamp every field into a usable range.
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            log::warn!("Invalid epsilon {}, using {}", self.epsilon, defaults.epsilon);
            self.epsilon = defaults.epsilon;
        }
        if !(self.boundary_tolerance.is_finite() && self.boundary_tolerance >= self.epsilon) {
            self.boundary_tolerance = defaults.boundary_tolerance.max(self.epsilon);
        }
        self.snap_decimals = self.snap_decimals.clamp(3, 12);
        self.curve_segments = self
            .curve_segments
            .clamp(MIN_CURVE_SEGMENTS, MAX_CURVE_SEGMENTS);
        self.trace_iteration_factor = self.trace_iteration_factor.max(2);
        self
    }

    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validate)
    }

    /// Grid scale used when bucketing points.
    pub(crate) fn snap_scale(&self) -> f64 {
        10f64.powi(self.snap_decimals as i32)
    }
}
