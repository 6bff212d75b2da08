//! Point-to-segment and point-to-polyline projection geometry.
//!
//! All projection math runs in raw coordinate space. The perpendicular
//! foot is found by scalar projection clamped to [0, 1]; degenerate
//! zero-length segments fall back to plain point distance.

use super::GeoPoint;

/// Result of projecting a point onto a polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolylineProjection {
    /// Closest point on the polyline.
    pub point: GeoPoint,
    /// Planar distance from the query point to `point`.
    pub distance: f64,
    /// Cumulative planar arc length from the polyline's first vertex to
    /// `point`: full lengths of all prior segments plus the partial
    /// distance along the matched segment.
    pub arc_length: f64,
    /// Index of the matched consecutive vertex pair (segment `i` spans
    /// vertices `i` and `i + 1`).
    pub segment_index: usize,
}

/// Shortest planar distance from `p` to the finite segment `a`–`b`.
pub fn point_to_segment_distance(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    closest_point_on_segment(p, a, b).planar_distance(&p)
}

/// Closest point to `p` on the finite segment `a`–`b`.
pub fn closest_point_on_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> GeoPoint {
    let seg = b - a;
    let len_sq = seg.length_squared();

    // Degenerate segment: both endpoints coincide.
    if len_sq == 0.0 {
        return a;
    }

    let t = ((p - a).dot(&seg) / len_sq).clamp(0.0, 1.0);
    a + seg * t
}

/// Project `p` onto the polyline given by `vertices`.
///
/// Scans every consecutive vertex pair and keeps the first-encountered
/// minimum distance; an exactly tied later candidate never replaces an
/// earlier one, so results are reproducible for identical inputs.
///
/// Returns `None` when the polyline has fewer than two vertices.
pub fn project_onto_polyline(p: GeoPoint, vertices: &[GeoPoint]) -> Option<PolylineProjection> {
    if vertices.len() < 2 {
        return None;
    }

    let mut best: Option<PolylineProjection> = None;
    let mut prefix_length = 0.0;

    for i in 0..vertices.len() - 1 {
        let a = vertices[i];
        let b = vertices[i + 1];
        let foot = closest_point_on_segment(p, a, b);
        let distance = foot.planar_distance(&p);

        let better = match best {
            Some(ref current) => distance < current.distance,
            None => true,
        };
        if better {
            best = Some(PolylineProjection {
                point: foot,
                distance,
                arc_length: prefix_length + a.planar_distance(&foot),
                segment_index: i,
            });
        }

        prefix_length += a.planar_distance(&b);
    }

    best
}
