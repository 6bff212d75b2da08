//! Curb segment polyline features.

use serde_json::{Map, Value};

use super::LabelState;
use crate::core::GeoPoint;

/// A curb segment: an ordered polyline, a unique identifier, the original
/// feature properties (passed through to the output), and the mutable
/// label state the engine assigns.
#[derive(Clone, Debug)]
pub struct CurbSegment {
    /// Unique segment identifier (from the input `label` property).
    pub id: String,
    /// Ordered polyline vertices. Valid geometry has at least two.
    pub vertices: Vec<GeoPoint>,
    /// Original feature properties, echoed into the output.
    pub properties: Map<String, Value>,
    /// Original GeoJSON geometry value, echoed into the output
    /// untouched. `Null` for segments constructed in code.
    pub geometry: Value,
    /// Current label state. Mutated in place by the assignment engine.
    pub state: LabelState,
}

impl CurbSegment {
    /// Create a segment with empty passthrough properties.
    pub fn new(id: impl Into<String>, vertices: Vec<GeoPoint>) -> Self {
        Self {
            id: id.into(),
            vertices,
            properties: Map::new(),
            geometry: Value::Null,
            state: LabelState::Unlabeled,
        }
    }

    /// Whether the geometry is a usable polyline (two or more vertices).
    ///
    /// Malformed segments are skipped by matching and adjacency but stay
    /// in the working set so they appear in the output with the sentinel.
    #[inline]
    pub fn is_valid_polyline(&self) -> bool {
        self.vertices.len() >= 2
    }

    /// First vertex of the polyline.
    pub fn start(&self) -> Option<GeoPoint> {
        self.vertices.first().copied()
    }

    /// Last vertex of the polyline.
    pub fn end(&self) -> Option<GeoPoint> {
        self.vertices.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        let empty = CurbSegment::new("a", vec![]);
        assert!(!empty.is_valid_polyline());
        assert_eq!(empty.start(), None);

        let single = CurbSegment::new("b", vec![GeoPoint::new(1.0, 2.0)]);
        assert!(!single.is_valid_polyline());

        let ok = CurbSegment::new(
            "c",
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)],
        );
        assert!(ok.is_valid_polyline());
        assert_eq!(ok.start(), Some(GeoPoint::new(0.0, 0.0)));
        assert_eq!(ok.end(), Some(GeoPoint::new(1.0, 0.0)));
    }

    #[test]
    fn test_new_segment_starts_unlabeled() {
        let seg = CurbSegment::new(
            "s",
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)],
        );
        assert_eq!(seg.state, LabelState::Unlabeled);
    }
}
