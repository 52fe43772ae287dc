//! The `Polygon` value type.

use serde::{Deserialize, Serialize};

use crate::geo::{BoundingBox, GeoPoint};

use super::metrics;

/// Ordered ring of geographic vertices.
///
/// Invariants:
/// - Order is significant (defines edges and winding) and is never changed.
/// - No two consecutive vertices are equal (enforced by `new` and on deserialize).
/// - May be explicitly closed (`first == last`); metrics treat the ring as
///   implicitly closed either way.
/// - Fewer than 3 vertices is representable; metrics then report zero/`None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GeoPoint>", into = "Vec<GeoPoint>")]
pub struct Polygon {
    points: Vec<GeoPoint>,
}

impl Polygon {
    /// Build from vertices, dropping consecutive duplicates.
    pub fn new(mut points: Vec<GeoPoint>) -> Self {
        points.dedup();
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` when the last vertex repeats the first.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.points.len() > 1 && self.points.first() == self.points.last()
    }

    /// Append the first vertex if the ring is not already explicitly closed.
    pub fn closed(mut self) -> Self {
        if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) {
            if first != last {
                self.points.push(first);
            }
        }
        self
    }

    /// Number of distinct ring vertices (ignores a closing duplicate).
    #[inline]
    pub fn vertex_count(&self) -> usize {
        if self.is_closed() {
            self.points.len() - 1
        } else {
            self.points.len()
        }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        metrics::area(&self.points)
    }

    #[inline]
    pub fn centroid(&self) -> Option<GeoPoint> {
        metrics::centroid(&self.points)
    }

    #[inline]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        metrics::bounding_box(&self.points)
    }

    #[inline]
    pub fn approximate_radius(&self) -> f64 {
        metrics::approximate_radius(&self.points)
    }
}

impl From<Vec<GeoPoint>> for Polygon {
    fn from(points: Vec<GeoPoint>) -> Self {
        Polygon::new(points)
    }
}

impl From<Polygon> for Vec<GeoPoint> {
    fn from(p: Polygon) -> Self {
        p.points
    }
}

impl AsRef<[GeoPoint]> for Polygon {
    fn as_ref(&self) -> &[GeoPoint] {
        &self.points
    }
}
