//! Derived polygon measures. All functions are total: degenerate input yields
//! `0.0` or `None`, never a panic.

use crate::geo::{distance, BoundingBox, GeoPoint};

use super::local::{project, signed_shoelace};

/// Area in m² via Shoelace on the local tangent plane at the naive centroid.
///
/// Returns `0.0` for fewer than 3 vertices. Invariant under cyclic rotation
/// and reversal of the vertex order (up to float rounding).
pub fn area(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let Some(center) = centroid(points) else {
        return 0.0;
    };
    signed_shoelace(&project(points, center)).abs()
}

/// Arithmetic mean of latitudes and longitudes.
pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat, lon) = points
        .iter()
        .fold((0.0, 0.0), |(la, lo), p| (la + p.lat, lo + p.lon));
    Some(GeoPoint::new(lat / n, lon / n))
}

#[inline]
pub fn bounding_box(points: &[GeoPoint]) -> Option<BoundingBox> {
    BoundingBox::around(points)
}

/// Mean great-circle distance from the centroid to each vertex.
pub fn approximate_radius(points: &[GeoPoint]) -> f64 {
    let Some(center) = centroid(points) else {
        return 0.0;
    };
    points.iter().map(|&p| distance(center, p)).sum::<f64>() / points.len() as f64
}
