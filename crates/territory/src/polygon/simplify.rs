//! Douglas-Peucker vertex reduction.
//!
//! The classic recursive formulation is run on an explicit work stack of
//! `(lo, hi)` index ranges, so depth does not grow with path length. A `keep`
//! mask records split points; endpoints are always kept.

use crate::geo::{distance, GeoPoint};

/// Reduce `points` so that every dropped vertex lies within `epsilon_m` metres
/// of the chord that replaced it.
///
/// - Split vertex: the first one (left-to-right) with the strictly greatest
///   distance to the current chord.
/// - Inputs of two points or fewer are returned unchanged.
/// - Idempotent for a fixed `epsilon_m` (re-running keeps the same vertices).
pub fn simplify(points: &[GeoPoint], epsilon_m: f64) -> Vec<GeoPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((lo, hi)) = stack.pop() {
        if hi <= lo + 1 {
            continue;
        }
        let mut max_d = 0.0;
        let mut max_i = lo;
        for (i, &p) in points.iter().enumerate().take(hi).skip(lo + 1) {
            let d = perpendicular_distance(p, points[lo], points[hi]);
            if d > max_d {
                max_d = d;
                max_i = i;
            }
        }
        if max_d > epsilon_m {
            keep[max_i] = true;
            stack.push((max_i, hi));
            stack.push((lo, max_i));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

/// Distance in metres from `p` to the segment `a→b`.
///
/// The foot of the perpendicular is located in planar lon/lat (x/y) space and
/// clamped to the segment; the reported length is the haversine distance to
/// it. A zero-length chord falls back to the distance to `a`.
pub(crate) fn perpendicular_distance(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let dx = b.lon - a.lon;
    let dy = b.lat - a.lat;
    if dx == 0.0 && dy == 0.0 {
        return distance(p, a);
    }
    let t = (((p.lon - a.lon) * dx + (p.lat - a.lat) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
    distance(p, a.lerp(b, t))
}
