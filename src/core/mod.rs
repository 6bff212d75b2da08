//! Fundamental geometry types and distance functions.

pub mod geodesic;
pub mod point;
pub mod polyline;

pub use geodesic::{haversine_distance, EARTH_RADIUS_M};
pub use point::GeoPoint;
pub use polyline::{
    closest_point_on_segment, point_to_segment_distance, project_onto_polyline,
    PolylineProjection,
};
