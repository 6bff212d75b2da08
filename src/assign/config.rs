//! Assignment engine configuration.

use serde::Deserialize;

/// Configuration for label assignment and propagation.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AssignConfig {
    /// Label categories never used as a direct-assignment source.
    /// Matched case-insensitively as substrings of the sign label.
    pub excluded_categories: Vec<String>,
    /// Propagation round cap. `None` uses the segment count, a safe
    /// upper bound since propagation distance cannot exceed the graph
    /// diameter.
    pub max_iterations: Option<usize>,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            excluded_categories: vec!["Street Cleaning".to_string()],
            max_iterations: None,
        }
    }
}

impl AssignConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for excluded categories.
    pub fn with_excluded_categories(mut self, categories: Vec<String>) -> Self {
        self.excluded_categories = categories;
        self
    }

    /// Builder-style setter for the iteration cap.
    pub fn with_max_iterations(mut self, cap: usize) -> Self {
        self.max_iterations = Some(cap);
        self
    }

    /// Whether a sign label falls in an excluded category.
    pub fn is_excluded(&self, label: &str) -> bool {
        let lowered = label.to_lowercase();
        self.excluded_categories
            .iter()
            .any(|pattern| lowered.contains(&pattern.to_lowercase()))
    }
}
