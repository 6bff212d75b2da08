//! R-tree spatial index over curb segment polylines.
//!
//! Accelerates nearest-curb queries from O(S·V) per sign to O(log S).
//! Query results must agree with the brute-force scan; the parity is
//! unit-tested in [`crate::matching::sign_to_curb`].

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::core::{project_onto_polyline, GeoPoint};
use crate::features::CurbSegment;

/// An indexed curb polyline for R-tree storage.
#[derive(Clone, Debug)]
struct IndexedCurb {
    /// Polyline vertices (copied from the segment at build time).
    vertices: Vec<GeoPoint>,
    /// Index of this segment in the original working set.
    index: usize,
}

impl RTreeObject for IndexedCurb {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for v in &self.vertices {
            min_x = min_x.min(v.x);
            min_y = min_y.min(v.y);
            max_x = max_x.max(v.x);
            max_y = max_y.max(v.y);
        }

        AABB::from_corners([min_x, min_y], [max_x, max_y])
    }
}

impl PointDistance for IndexedCurb {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let p = GeoPoint::new(point[0], point[1]);
        match project_onto_polyline(p, &self.vertices) {
            Some(proj) => proj.distance * proj.distance,
            None => f64::MAX,
        }
    }

    fn contains_point(&self, _point: &[f64; 2]) -> bool {
        false // Polylines have zero area.
    }
}

/// Spatial index over curb segments.
///
/// Only valid polylines (two or more vertices) are indexed; malformed
/// segments never participate in matching.
pub struct CurbSpatialIndex {
    tree: RTree<IndexedCurb>,
}

impl CurbSpatialIndex {
    /// Build an index over the valid segments of the working set.
    pub fn build(segments: &[CurbSegment]) -> Self {
        let indexed: Vec<IndexedCurb> = segments
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_valid_polyline())
            .map(|(i, s)| IndexedCurb {
                vertices: s.vertices.clone(),
                index: i,
            })
            .collect();

        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Number of indexed segments.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Find the segment nearest to `point` in planar coordinate space.
    ///
    /// Returns `(segment_index, planar_distance)`.
    pub fn nearest_curb(&self, point: GeoPoint) -> Option<(usize, f64)> {
        let q = [point.x, point.y];
        self.tree.nearest_neighbor(&q).map(|indexed| {
            let dist = indexed.distance_2(&q).sqrt();
            (indexed.index, dist)
        })
    }
}

impl std::fmt::Debug for CurbSpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurbSpatialIndex")
            .field("size", &self.tree.size())
            .finish()
    }
}
