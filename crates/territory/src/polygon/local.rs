//! Local tangent-plane projection around a reference point.
//!
//! Each axis magnitude is a haversine distance from the origin along that
//! axis; the sign comes from the coordinate's side of the origin. This keeps
//! planar formulas metric (x east, y north, metres) at territory scale.

use nalgebra::Vector2;

use crate::geo::{distance, GeoPoint};

/// Project `p` into metres east/north of `origin`.
#[inline]
pub(crate) fn to_local(p: GeoPoint, origin: GeoPoint) -> Vector2<f64> {
    let dx = distance(origin, GeoPoint::new(origin.lat, p.lon));
    let dy = distance(origin, GeoPoint::new(p.lat, origin.lon));
    let sx = if p.lon >= origin.lon { 1.0 } else { -1.0 };
    let sy = if p.lat >= origin.lat { 1.0 } else { -1.0 };
    Vector2::new(dx * sx, dy * sy)
}

pub(crate) fn project(points: &[GeoPoint], origin: GeoPoint) -> Vec<Vector2<f64>> {
    points.iter().map(|&p| to_local(p, origin)).collect()
}

/// Signed area of the parallelogram spanned by `a` and `b`.
#[inline]
pub(crate) fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed Shoelace area of the implicitly closed ring (CCW positive).
pub(crate) fn signed_shoelace(ring: &[Vector2<f64>]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n).map(|i| cross(ring[i], ring[(i + 1) % n])).sum();
    twice / 2.0
}
