//! Sign→curb matching: for each sign, the nearest curb polyline.
//!
//! Two paths are provided:
//! - `nearest_curb_brute`: O(S·V) scan over all valid segments
//! - `nearest_curb_indexed`: O(log S) via [`CurbSpatialIndex`]
//!
//! Both must return the same match; the indexed path only narrows the
//! candidate and recomputes the full projection on the winner.

use super::CurbSpatialIndex;
use crate::core::{project_onto_polyline, GeoPoint, PolylineProjection};
use crate::features::CurbSegment;

/// A sign snapped onto its nearest curb segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurbMatch {
    /// Index of the matched segment in the working set.
    pub segment_index: usize,
    /// Projection of the sign onto the matched polyline.
    pub projection: PolylineProjection,
}

/// Find the nearest valid curb segment by scanning all segments.
///
/// Strict less-than keeps the first-encountered minimum on an exact tie,
/// so results are reproducible for identical inputs. Returns `None` when
/// no valid polyline exists.
pub fn nearest_curb_brute(sign: GeoPoint, segments: &[CurbSegment]) -> Option<CurbMatch> {
    let mut best: Option<CurbMatch> = None;

    for (i, segment) in segments.iter().enumerate() {
        let Some(proj) = project_onto_polyline(sign, &segment.vertices) else {
            continue;
        };

        let better = match best {
            Some(ref current) => proj.distance < current.projection.distance,
            None => true,
        };
        if better {
            best = Some(CurbMatch {
                segment_index: i,
                projection: proj,
            });
        }
    }

    best
}

/// Find the nearest curb segment through the spatial index.
pub fn nearest_curb_indexed(
    sign: GeoPoint,
    segments: &[CurbSegment],
    index: &CurbSpatialIndex,
) -> Option<CurbMatch> {
    let (segment_index, _) = index.nearest_curb(sign)?;
    let projection = project_onto_polyline(sign, &segments[segment_index].vertices)?;

    Some(CurbMatch {
        segment_index,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_segments() -> Vec<CurbSegment> {
        vec![
            CurbSegment::new(
                "a",
                vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(4.0, 0.0)],
            ),
            CurbSegment::new(
                "b",
                vec![GeoPoint::new(0.0, 2.0), GeoPoint::new(4.0, 2.0)],
            ),
            CurbSegment::new(
                "c",
                vec![
                    GeoPoint::new(10.0, 0.0),
                    GeoPoint::new(12.0, 0.0),
                    GeoPoint::new(12.0, 3.0),
                ],
            ),
        ]
    }

    #[test]
    fn test_brute_picks_closest_segment() {
        let segments = make_segments();

        let m = nearest_curb_brute(GeoPoint::new(2.0, 0.3), &segments).unwrap();
        assert_eq!(m.segment_index, 0);
        assert!((m.projection.distance - 0.3).abs() < 1e-12);

        let m = nearest_curb_brute(GeoPoint::new(2.0, 1.8), &segments).unwrap();
        assert_eq!(m.segment_index, 1);
    }

    #[test]
    fn test_brute_skips_malformed() {
        let segments = vec![
            CurbSegment::new("broken", vec![GeoPoint::new(0.0, 0.0)]),
            CurbSegment::new(
                "ok",
                vec![GeoPoint::new(0.0, 1.0), GeoPoint::new(4.0, 1.0)],
            ),
        ];

        // The malformed segment is closer but cannot match.
        let m = nearest_curb_brute(GeoPoint::new(0.0, 0.1), &segments).unwrap();
        assert_eq!(m.segment_index, 1);
    }

    #[test]
    fn test_brute_no_candidates() {
        assert!(nearest_curb_brute(GeoPoint::ZERO, &[]).is_none());

        let malformed = vec![CurbSegment::new("x", vec![GeoPoint::new(1.0, 1.0)])];
        assert!(nearest_curb_brute(GeoPoint::ZERO, &malformed).is_none());
    }

    #[test]
    fn test_indexed_matches_brute_force() {
        let segments = make_segments();
        let index = CurbSpatialIndex::build(&segments);

        let queries = [
            GeoPoint::new(2.0, 0.3),
            GeoPoint::new(2.0, 1.8),
            GeoPoint::new(11.0, 0.4),
            GeoPoint::new(12.4, 2.0),
            GeoPoint::new(-3.0, -1.0),
        ];

        for q in queries {
            let brute = nearest_curb_brute(q, &segments).unwrap();
            let indexed = nearest_curb_indexed(q, &segments, &index).unwrap();
            assert_eq!(brute.segment_index, indexed.segment_index, "query {:?}", q);
            assert!(
                (brute.projection.distance - indexed.projection.distance).abs() < 1e-12,
                "query {:?}",
                q
            );
            assert!(
                (brute.projection.arc_length - indexed.projection.arc_length).abs() < 1e-12,
                "query {:?}",
                q
            );
        }
    }

    #[test]
    fn test_projection_arc_length_orders_signs_along_segment() {
        let segments = make_segments();

        let near_start = nearest_curb_brute(GeoPoint::new(0.5, 0.2), &segments).unwrap();
        let near_end = nearest_curb_brute(GeoPoint::new(3.5, 0.2), &segments).unwrap();

        assert_eq!(near_start.segment_index, near_end.segment_index);
        assert!(near_start.projection.arc_length < near_end.projection.arc_length);
    }
}
