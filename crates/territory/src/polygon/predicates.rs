//! Planar predicates on lon/lat (x/y) coordinates.
//!
//! Orientation and containment are scale-free, so they run directly on
//! degrees; no projection is needed at territory scale.

use nalgebra::Vector2;

use crate::geo::{BoundingBox, GeoPoint};

use super::local::cross;

#[inline]
fn xy(p: GeoPoint) -> Vector2<f64> {
    Vector2::new(p.lon, p.lat)
}

/// Orientation of `c` relative to the directed line `a→b` (sign of the cross product).
#[inline]
fn orientation(a: GeoPoint, b: GeoPoint, c: GeoPoint) -> f64 {
    cross(xy(b) - xy(a), xy(c) - xy(a))
}

/// `q` lies inside the axis-aligned box spanned by `p` and `r`.
#[inline]
fn on_segment(p: GeoPoint, q: GeoPoint, r: GeoPoint) -> bool {
    p.lon.min(r.lon) <= q.lon
        && q.lon <= p.lon.max(r.lon)
        && p.lat.min(r.lat) <= q.lat
        && q.lat <= p.lat.max(r.lat)
}

/// Closed-segment intersection test, including collinear overlap and
/// shared endpoints.
pub fn segments_intersect(a1: GeoPoint, a2: GeoPoint, b1: GeoPoint, b2: GeoPoint) -> bool {
    let d1 = orientation(a1, a2, b1);
    let d2 = orientation(a1, a2, b2);
    let d3 = orientation(b1, b2, a1);
    let d4 = orientation(b1, b2, a2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(a1, b1, a2))
        || (d2 == 0.0 && on_segment(a1, b2, a2))
        || (d3 == 0.0 && on_segment(b1, a1, b2))
        || (d4 == 0.0 && on_segment(b1, a2, b2))
}

/// Even-odd ray casting. Requires at least 3 vertices (otherwise `false`).
///
/// Points exactly on an edge or vertex may be classified either way.
pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.lat > point.lat) != (pj.lat > point.lat)
            && point.lon < (pj.lon - pi.lon) * (point.lat - pi.lat) / (pj.lat - pi.lat) + pi.lon
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Boolean overlap test (does not compute the shared region).
///
/// Bounding boxes reject first; then any vertex of either ring inside the
/// other, then any pair of intersecting edges. Symmetric in its arguments.
pub fn polygons_overlap(p1: &[GeoPoint], p2: &[GeoPoint]) -> bool {
    let (Some(b1), Some(b2)) = (BoundingBox::around(p1), BoundingBox::around(p2)) else {
        return false;
    };
    if !b1.intersects(&b2) {
        return false;
    }
    if p1.iter().any(|&p| point_in_polygon(p, p2)) || p2.iter().any(|&p| point_in_polygon(p, p1))
    {
        return true;
    }
    edges(p1).any(|(a1, a2)| edges(p2).any(|(b1, b2)| segments_intersect(a1, a2, b1, b2)))
}

/// Ring edges including the implicit closing edge.
fn edges(ring: &[GeoPoint]) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
    let n = ring.len();
    (0..n).map(move |i| (ring[i], ring[(i + 1) % n]))
}
