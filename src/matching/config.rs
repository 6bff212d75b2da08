//! Nearest-match configuration.

use serde::Deserialize;

/// Which direction the nearest-match resolver works in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// For each qualifying sign, find its nearest curb segment and snap
    /// the sign onto it. Competing signs on one segment are ordered by
    /// arc length from the segment start.
    SignToCurb,
    /// For each curb segment's start vertex, find the nearest qualifying
    /// sign; reject matches beyond the metric distance threshold.
    CurbToSign,
}

/// Configuration for the nearest-match resolver.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Matching direction.
    pub mode: MatchMode,
    /// Maximum great-circle distance (meters) for a valid curb→sign
    /// match. Ignored in sign→curb mode.
    pub max_distance_m: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::SignToCurb,
            max_distance_m: 8.0,
        }
    }
}

impl MatchConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the matching mode.
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder-style setter for the distance threshold.
    pub fn with_max_distance_m(mut self, meters: f64) -> Self {
        self.max_distance_m = meters;
        self
    }
}
