//! Regulation sign point features.

use crate::core::GeoPoint;

/// A regulation sign: a point coordinate plus its cleaned label.
///
/// Signs are read-only inputs; invalid labels are filtered at load time
/// and never construct a `SignPoint`.
#[derive(Clone, Debug, PartialEq)]
pub struct SignPoint {
    /// Sign location in the input CRS.
    pub position: GeoPoint,
    /// Cleaned regulation category.
    pub label: String,
}

impl SignPoint {
    /// Create a new sign point.
    pub fn new(position: GeoPoint, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}
