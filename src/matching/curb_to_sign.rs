//! Curb→sign matching: for each curb start vertex, the nearest sign.
//!
//! A k-d tree over sign coordinates answers nearest-neighbor queries in
//! planar coordinate space; the accept/reject threshold is then applied
//! on the great-circle distance in meters, matching how the distance
//! model is split everywhere else in the pipeline.

use kiddo::{KdTree, SquaredEuclidean};

use crate::core::{haversine_distance, GeoPoint};
use crate::features::SignPoint;

/// K-d tree over sign coordinates.
pub struct SignIndex {
    tree: KdTree<f64, 2>,
    len: usize,
}

impl SignIndex {
    /// Build an index over all signs.
    pub fn build(signs: &[SignPoint]) -> Self {
        let mut tree: KdTree<f64, 2> = KdTree::new();
        for (i, sign) in signs.iter().enumerate() {
            tree.add(&[sign.position.x, sign.position.y], i as u64);
        }
        Self {
            tree,
            len: signs.len(),
        }
    }

    /// Number of indexed signs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nearest sign to `query` in planar coordinate space.
    ///
    /// Returns `(sign_index, planar_distance)`.
    pub fn nearest_sign(&self, query: GeoPoint) -> Option<(usize, f64)> {
        if self.is_empty() {
            return None;
        }
        let found = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        Some((found.item as usize, found.distance.sqrt()))
    }
}

impl std::fmt::Debug for SignIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignIndex").field("size", &self.len).finish()
    }
}

/// Nearest sign by scanning all signs (parity reference for the index).
pub fn nearest_sign_brute(query: GeoPoint, signs: &[SignPoint]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for (i, sign) in signs.iter().enumerate() {
        let dist = query.planar_distance(&sign.position);
        let better = match best {
            Some((_, current)) => dist < current,
            None => true,
        };
        if better {
            best = Some((i, dist));
        }
    }

    best
}

/// Nearest sign within the metric threshold.
///
/// The nearest candidate is found in planar space through the index; the
/// match is rejected when its great-circle distance exceeds
/// `max_distance_m`. Returns `(sign_index, distance_meters)`.
pub fn nearest_sign_within(
    query: GeoPoint,
    signs: &[SignPoint],
    index: &SignIndex,
    max_distance_m: f64,
) -> Option<(usize, f64)> {
    let (sign_index, _) = index.nearest_sign(query)?;
    let meters = haversine_distance(query, signs[sign_index].position);

    if meters <= max_distance_m {
        Some((sign_index, meters))
    } else {
        None
    }
}
