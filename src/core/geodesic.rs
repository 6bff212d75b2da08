//! Great-circle distance on the WGS84 sphere approximation.
//!
//! All metric thresholds and reported distances in the pipeline use the
//! haversine formula on a spherical Earth. Planar coordinate-space
//! distance (see [`GeoPoint::planar_distance`]) is used only for
//! nearest-neighbor ordering and projection geometry; the two models are
//! not interchangeable and must never be mixed in a comparison.

use super::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two WGS84 coordinates, in meters.
///
/// Inputs are (longitude, latitude) in decimal degrees.
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lon1 = a.x.to_radians();
    let lat1 = a.y.to_radians();
    let lon2 = b.x.to_radians();
    let lat2 = b.y.to_radians();

    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * h.sqrt().asin() * EARTH_RADIUS_M
}
