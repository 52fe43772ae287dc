//! Approximate polygon subtraction ("carving").
//!
//! The remainder is the subsequence of target vertices lying outside the
//! carver. Boundary intersection points are not reconstructed, so the cut edge
//! follows original target vertices and is jagged rather than a clean curve.

use super::predicates::{point_in_polygon, polygons_overlap};
use super::Polygon;

/// Subtract `carver` from `target`.
///
/// - No overlap: `Some(target.clone())`.
/// - Fewer than 3 surviving vertices, or surviving area below
///   `min_area_m2`: `None` (fully consumed).
/// - Otherwise the filtered remainder.
pub fn subtract(target: &Polygon, carver: &Polygon, min_area_m2: f64) -> Option<Polygon> {
    if !polygons_overlap(target.points(), carver.points()) {
        return Some(target.clone());
    }
    let remaining = Polygon::new(
        target
            .points()
            .iter()
            .copied()
            .filter(|&p| !point_in_polygon(p, carver.points()))
            .collect(),
    );
    if remaining.vertex_count() < 3 {
        return None;
    }
    let area = remaining.area();
    if area < min_area_m2 {
        tracing::debug!(area_m2 = area, min_area_m2, "carved remainder below minimum");
        return None;
    }
    Some(remaining)
}
