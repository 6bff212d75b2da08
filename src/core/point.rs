//! Coordinate type for geographic features.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D coordinate in the input CRS (x = longitude, y = latitude for
/// WGS84 inputs, or raw planar units).
///
/// Planar operations on this type work in raw coordinate space. Metric
/// distances between geographic coordinates live in
/// [`crate::core::geodesic`].
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// X coordinate (longitude in degrees for WGS84).
    pub x: f64,
    /// Y coordinate (latitude in degrees for WGS84).
    pub y: f64,
}

impl GeoPoint {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point.
    pub const ZERO: GeoPoint = GeoPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance in raw coordinate space.
    #[inline]
    pub fn planar_distance(&self, other: &GeoPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared planar distance (avoids sqrt).
    #[inline]
    pub fn planar_distance_squared(&self, other: &GeoPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Dot product with another point (as vectors).
    #[inline]
    pub fn dot(&self, other: &GeoPoint) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Length (magnitude) as a vector from the origin.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Squared length as a vector from the origin.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Add for GeoPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GeoPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GeoPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GeoPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for GeoPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        GeoPoint::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_distance() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert!((a.planar_distance(&b) - 5.0).abs() < 1e-12);
        assert!((a.planar_distance_squared(&b) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_ops() {
        let a = GeoPoint::new(1.0, 2.0);
        let b = GeoPoint::new(3.0, -1.0);

        assert_eq!(a + b, GeoPoint::new(4.0, 1.0));
        assert_eq!(b - a, GeoPoint::new(2.0, -3.0));
        assert_eq!(a * 2.0, GeoPoint::new(2.0, 4.0));
        assert!((a.dot(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_length() {
        let p = GeoPoint::new(3.0, 4.0);
        assert!((p.length() - 5.0).abs() < 1e-12);
        assert!((p.length_squared() - 25.0).abs() < 1e-12);
    }
}
