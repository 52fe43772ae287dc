//! Path cleanup before polygon construction: jitter smoothing and
//! self-intersection resolution.
//!
//! `find_largest_loop` is a heuristic. It resolves a single self-crossing into
//! the sub-loop enclosing the most area; for paths with many crossings it may
//! miss the true largest simple loop.

use crate::geo::GeoPoint;

use super::metrics::area;
use super::predicates::segments_intersect;

/// Centered moving average over `[i - window/2, i + window/2]`, clamped to the
/// path. Paths no longer than `window` are returned unchanged.
pub fn smooth(points: &[GeoPoint], window: usize) -> Vec<GeoPoint> {
    if points.len() <= window {
        return points.to_vec();
    }
    let half = window / 2;
    let last = points.len() - 1;
    (0..points.len())
        .map(|i| {
            let span = &points[i.saturating_sub(half)..=(i + half).min(last)];
            let n = span.len() as f64;
            let (lat, lon) = span
                .iter()
                .fold((0.0, 0.0), |(la, lo), p| (la + p.lat, lo + p.lon));
            GeoPoint::new(lat / n, lon / n)
        })
        .collect()
}

/// Index pairs `(i, j)` of crossing path segments `i→i+1` and `j→j+1`.
///
/// Adjacent segments are skipped, as is the first/last segment pair (they
/// meet at the intentional loop closure).
pub fn self_intersections(path: &[GeoPoint]) -> Vec<(usize, usize)> {
    let n = path.len();
    let mut out = Vec::new();
    if n < 4 {
        return out;
    }
    for i in 0..n - 2 {
        for j in (i + 2)..n - 1 {
            if i == 0 && j == n - 2 {
                continue;
            }
            if segments_intersect(path[i], path[i + 1], path[j], path[j + 1]) {
                out.push((i, j));
            }
        }
    }
    out
}

/// Largest-area simple loop of `path`. `None` for fewer than 3 points.
///
/// Without crossings the whole path is the loop. Otherwise every crossing
/// `(i, j)` proposes `path[i..=j]` and `path[..=i] ++ path[j..]`; the
/// candidate with the strictly greatest area wins. If no candidate has
/// positive area the whole path is returned.
pub fn find_largest_loop(path: &[GeoPoint]) -> Option<Vec<GeoPoint>> {
    if path.len() < 3 {
        return None;
    }
    let crossings = self_intersections(path);
    if crossings.is_empty() {
        return Some(path.to_vec());
    }

    let mut best: Option<Vec<GeoPoint>> = None;
    let mut best_area = 0.0;
    for (i, j) in crossings {
        let inner = path[i..=j].to_vec();
        let outer: Vec<GeoPoint> = path[..=i].iter().chain(&path[j..]).copied().collect();
        for candidate in [inner, outer] {
            let a = area(&candidate);
            if a > best_area {
                best_area = a;
                best = Some(candidate);
            }
        }
    }
    tracing::debug!(area_m2 = best_area, "resolved self-intersecting path");
    Some(best.unwrap_or_else(|| path.to_vec()))
}
