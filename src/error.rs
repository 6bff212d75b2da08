//! Error types for the labeling pipeline.

/// Result type alias.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal pipeline errors.
///
/// Per-feature anomalies (a single malformed geometry, an unusable
/// label) are not errors: they are skipped with a logged warning. A
/// segment that ends the run unlabeled is a valid terminal state,
/// surfaced through the sentinel label and summary counts.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not parseable JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file failed to parse.
    #[error("malformed config: {0}")]
    Config(#[from] basic_toml::Error),

    /// Input parsed but is not a GeoJSON FeatureCollection.
    #[error("not a FeatureCollection: {0}")]
    NotFeatureCollection(String),

    /// A required property is missing from every feature.
    #[error("required property '{0}' missing from all features")]
    MissingProperty(&'static str),

    /// No qualifying sign remains after cleaning and category filtering.
    #[error("no valid regulation signs to assign from")]
    NoValidSigns,
}
