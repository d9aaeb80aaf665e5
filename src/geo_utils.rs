//! # Geographic Utilities
//!
//! Core geographic operations shared by hotspot detection and route
//! handling. All functions expect WGS84 coordinates (latitude/longitude
//! in degrees), the standard used by GPS receivers and mapping services.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two points |
//! | [`path_length`] | Total length of a point sequence in meters |
//! | [`compute_center`] | Centroid of a point set |
//! | [`meters_to_degrees`] | Convert meters to approximate degrees at a latitude |
//!
//! The haversine formula is accurate to within 0.3% for practical
//! distances, which is far below the thresholds this crate works with
//! (tens to hundreds of meters).

use crate::GeoPoint;
use geo::{Distance, Haversine, Point};

/// Calculate the great-circle distance between two points using the
/// Haversine formula.
///
/// Returns the distance in meters along the Earth's surface (assuming a
/// spherical Earth with radius 6,371 km).
///
/// # Example
///
/// ```rust
/// use task_mapper::{geo_utils, GeoPoint};
///
/// let library = GeoPoint::new(37.78825, -122.4324);
/// let quad = GeoPoint::new(37.78925, -122.4334);
///
/// let distance = geo_utils::haversine_distance(&library, &quad);
/// assert!(distance < 200.0);
/// ```
#[inline]
pub fn haversine_distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Calculate the total length of a point sequence in meters.
///
/// Sums the haversine distance between consecutive points. Empty or
/// single-point sequences return 0.0.
pub fn path_length(points: &[GeoPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Compute the geographic center (centroid) of a point set.
///
/// Arithmetic mean of all latitudes and longitudes - fine for the
/// campus-scale areas this crate deals in, not for sets spanning the
/// antimeridian. Returns (0, 0) for empty input.
pub fn compute_center(points: &[GeoPoint]) -> GeoPoint {
    if points.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }

    let sum_lat: f64 = points.iter().map(|p| p.latitude).sum();
    let sum_lng: f64 = points.iter().map(|p| p.longitude).sum();
    let n = points.len() as f64;

    GeoPoint::new(sum_lat / n, sum_lng / n)
}

/// Convert meters to approximate degrees at a given latitude.
///
/// At the equator 1 degree is about 111,320 m; the longitude scale
/// shrinks with cos(latitude). Used to size bounding-box searches, where
/// a slightly generous square is acceptable.
#[inline]
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    let lat_rad = latitude.to_radians();
    let meters_per_degree = 111_320.0 * lat_rad.cos().max(0.1);
    meters / meters_per_degree
}
