use super::*;
use crate::geo::{distance, offset, GeoPoint};
use proptest::prelude::*;

const ORIGIN: GeoPoint = GeoPoint::new(47.3769, 8.5417);

fn at(x: f64, y: f64) -> GeoPoint {
    offset(ORIGIN, x, y)
}

/// Axis-aligned rectangle with a vertex every `step` metres, CCW from (x0, y0).
fn rect(x0: f64, y0: f64, x1: f64, y1: f64, step: f64) -> Polygon {
    let corners = [(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
    let mut pts = Vec::new();
    for k in 0..4 {
        let (ax, ay) = corners[k];
        let (bx, by) = corners[(k + 1) % 4];
        let len = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
        let n = (len / step).round().max(1.0) as usize;
        for s in 0..n {
            let t = s as f64 / n as f64;
            pts.push(at(ax + t * (bx - ax), ay + t * (by - ay)));
        }
    }
    Polygon::new(pts)
}

fn square(side: f64) -> Polygon {
    rect(0.0, 0.0, side, side, side)
}

#[test]
fn square_area_matches_side_squared() {
    let a = square(50.0).area();
    assert!((a - 2500.0).abs() / 2500.0 < 1e-3, "area {a}");
}

#[test]
fn closing_duplicate_does_not_change_area() {
    let open = square(50.0);
    let closed = open.clone().closed();
    assert!(closed.is_closed());
    assert_eq!(closed.vertex_count(), 4);
    assert!((open.area() - closed.area()).abs() < 1.0);
}

#[test]
fn degenerate_inputs_yield_zero_or_none() {
    assert_eq!(area(&[]), 0.0);
    assert_eq!(area(&[at(0.0, 0.0), at(10.0, 0.0)]), 0.0);
    let line = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];
    assert!(area(&line) < 1e-6);
    assert!(centroid(&[]).is_none());
    assert!(bounding_box(&[]).is_none());
    assert_eq!(approximate_radius(&[]), 0.0);
}

#[test]
fn polygon_new_drops_consecutive_duplicates() {
    let p = Polygon::new(vec![at(0.0, 0.0), at(0.0, 0.0), at(10.0, 0.0), at(10.0, 10.0)]);
    assert_eq!(p.len(), 3);
}

#[test]
fn polygon_serializes_as_ordered_pairs() {
    let p = square(20.0);
    let json = serde_json::to_string(&p).unwrap();
    let back: Polygon = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
    assert!(json.starts_with("[["));
}

#[test]
fn centroid_bbox_and_radius_of_square() {
    let p = square(100.0);
    let c = p.centroid().unwrap();
    assert!(distance(c, at(50.0, 50.0)) < 0.01);
    let b = p.bounding_box().unwrap();
    assert!(distance(b.min, at(0.0, 0.0)) < 1e-6);
    assert!(distance(b.max, at(100.0, 100.0)) < 1e-6);
    let half_diag = 50.0 * std::f64::consts::SQRT_2;
    assert!((p.approximate_radius() - half_diag).abs() < 0.05);
}

#[test]
fn simplify_straight_line_keeps_endpoints() {
    let line: Vec<GeoPoint> = (0..20).map(|k| at(0.0, k as f64 * 5.0)).collect();
    let s = simplify(&line, 0.01);
    assert_eq!(s, vec![line[0], line[19]]);
}

#[test]
fn simplify_keeps_corner_and_is_idempotent() {
    let mut path: Vec<GeoPoint> = (0..=10).map(|k| at(k as f64 * 5.0, 0.0)).collect();
    path.extend((1..=10).map(|k| at(50.0, k as f64 * 5.0)));
    let s = simplify(&path, 2.0);
    assert_eq!(s, vec![at(0.0, 0.0), at(50.0, 0.0), at(50.0, 50.0)]);
    assert_eq!(simplify(&s, 2.0), s);
}

#[test]
fn simplify_short_inputs_unchanged() {
    let two = vec![at(0.0, 0.0), at(1.0, 1.0)];
    assert_eq!(simplify(&two, 2.0), two);
    assert!(simplify(&[], 2.0).is_empty());
}

#[test]
fn simplify_closed_ring_uses_point_distance_on_zero_chord() {
    let ring = rect(0.0, 0.0, 40.0, 40.0, 10.0).closed();
    let s = simplify(ring.points(), 2.0);
    // The four corners plus the closing duplicate survive.
    assert_eq!(s.len(), 5);
    assert_eq!(s.first(), s.last());
}

#[test]
fn smooth_averages_centered_window() {
    let path = vec![at(0.0, 0.0), at(0.0, 3.0), at(0.0, 9.0), at(0.0, 12.0)];
    let s = smooth(&path, 3);
    assert_eq!(s.len(), 4);
    assert!(distance(s[0], at(0.0, 1.5)) < 1e-6);
    assert!(distance(s[1], at(0.0, 4.0)) < 1e-6);
    assert!(distance(s[3], at(0.0, 10.5)) < 1e-6);
    let short = vec![at(0.0, 0.0), at(0.0, 3.0), at(0.0, 9.0)];
    assert_eq!(smooth(&short, 3), short);
}

#[test]
fn largest_loop_without_crossings_is_whole_path() {
    let ring = square(30.0).closed().into_points();
    assert_eq!(find_largest_loop(&ring), Some(ring.clone()));
    assert!(find_largest_loop(&ring[..2]).is_none());
}

#[test]
fn largest_loop_picks_bigger_candidate() {
    let a = at(0.0, 0.0);
    let b = at(60.0, 60.0);
    let c = at(60.0, 0.0);
    let d = at(0.0, 90.0);
    let path = vec![a, b, c, d, a];
    assert_eq!(self_intersections(&path), vec![(0, 2)]);
    let got = find_largest_loop(&path).unwrap();
    assert_eq!(got, vec![a, c, d, a]);
    assert!((area(&got) - 2700.0).abs() < 5.0);
}

#[test]
fn largest_loop_prefers_inner_candidate() {
    // tails at both ends cross at (20, 0); the loop between them is larger
    let path = vec![
        at(-20.0, 0.0),
        at(60.0, 0.0),
        at(60.0, 60.0),
        at(20.0, 60.0),
        at(20.0, -20.0),
        at(20.0, -30.0),
    ];
    assert_eq!(self_intersections(&path), vec![(0, 3)]);
    let got = find_largest_loop(&path).unwrap();
    assert_eq!(got, path[..=3].to_vec());
    assert!((area(&got) - 3600.0).abs() < 5.0);
}

#[test]
fn point_in_polygon_centroid_and_far_point() {
    let p = square(50.0);
    let c = p.centroid().unwrap();
    assert!(point_in_polygon(c, p.points()));
    assert!(!point_in_polygon(at(500.0, 500.0), p.points()));
    assert!(!point_in_polygon(c, &p.points()[..2]));
}

#[test]
fn segment_intersection_cases() {
    // proper crossing
    assert!(segments_intersect(at(0.0, 0.0), at(10.0, 10.0), at(0.0, 10.0), at(10.0, 0.0)));
    // parallel, disjoint
    assert!(!segments_intersect(at(0.0, 0.0), at(10.0, 0.0), at(0.0, 5.0), at(10.0, 5.0)));
    // shared endpoint
    let shared = at(10.0, 0.0);
    assert!(segments_intersect(at(0.0, 0.0), shared, shared, at(10.0, 10.0)));
    // collinear overlap on one axis
    let (a1, a2) = (GeoPoint::new(1.0, 1.0), GeoPoint::new(1.0, 3.0));
    let (b1, b2) = (GeoPoint::new(1.0, 2.0), GeoPoint::new(1.0, 4.0));
    assert!(segments_intersect(a1, a2, b1, b2));
}

#[test]
fn overlap_cases() {
    let base = square(50.0);
    let far = rect(200.0, 200.0, 250.0, 250.0, 50.0);
    let nested = rect(10.0, 10.0, 20.0, 20.0, 10.0);
    assert!(!polygons_overlap(base.points(), far.points()));
    assert!(polygons_overlap(base.points(), nested.points()));
    assert!(polygons_overlap(nested.points(), base.points()));
    // A plus-sign arrangement: edges cross, no vertex of either is inside the other.
    let wide = rect(-20.0, 20.0, 70.0, 30.0, 90.0);
    let tall = rect(20.0, -20.0, 30.0, 70.0, 90.0);
    assert!(polygons_overlap(wide.points(), tall.points()));
    assert!(!polygons_overlap(&[], base.points()));
}

#[test]
fn carve_without_overlap_returns_target() {
    let target = square(60.0);
    let carver = rect(200.0, 0.0, 260.0, 60.0, 60.0);
    assert_eq!(subtract(&target, &carver, 1963.0), Some(target));
}

#[test]
fn carve_by_containing_polygon_consumes_target() {
    let target = rect(0.0, 0.0, 100.0, 100.0, 10.0);
    let carver = rect(-50.0, -50.0, 150.0, 150.0, 200.0);
    assert!(subtract(&target, &carver, 1963.0).is_none());
}

#[test]
fn carve_half_shrinks_target() {
    let target = rect(0.0, 0.0, 100.0, 100.0, 10.0);
    let carver = rect(-20.0, -20.0, 55.0, 120.0, 10.0);
    let original = target.area();
    let rest = subtract(&target, &carver, 1963.0).expect("remainder survives");
    assert!(rest.area() < original);
    assert!((rest.area() - 4000.0).abs() < 100.0, "area {}", rest.area());
    assert!(rest.points().iter().all(|p| !point_in_polygon(*p, carver.points())));
}

#[test]
fn carve_below_minimum_area_consumes_target() {
    let target = rect(0.0, 0.0, 100.0, 100.0, 10.0);
    let carver = rect(-20.0, -20.0, 85.0, 120.0, 10.0);
    assert!(subtract(&target, &carver, 1963.0).is_none());
}

fn ring() -> impl Strategy<Value = Vec<GeoPoint>> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 3..12)
        .prop_map(|xy| xy.into_iter().map(|(x, y)| at(x, y)).collect())
}

/// Regular n-gon, stretched per axis and rotated; always convex.
fn convex_ring() -> impl Strategy<Value = Vec<GeoPoint>> {
    (3usize..16, 5.0f64..500.0, 0.3f64..3.0, 0.0f64..std::f64::consts::TAU, -200.0f64..200.0)
        .prop_map(|(n, r, stretch, rot, shift)| {
            (0..n)
                .map(|k| {
                    let th = rot + std::f64::consts::TAU * k as f64 / n as f64;
                    at(shift + r * stretch * th.cos(), shift + r * th.sin())
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn centroid_of_convex_ring_is_inside(pts in convex_ring()) {
        let c = centroid(&pts).unwrap();
        prop_assert!(point_in_polygon(c, &pts));
    }

    #[test]
    fn area_non_negative(pts in ring()) {
        prop_assert!(area(&pts) >= 0.0);
    }

    #[test]
    fn area_invariant_under_rotation_and_reversal(pts in ring(), k in 0usize..12) {
        let a = area(&pts);
        let mut rotated = pts.clone();
        rotated.rotate_left(k % pts.len());
        let mut reversed = pts.clone();
        reversed.reverse();
        let tol = 1e-6 * a.max(1.0);
        prop_assert!((area(&rotated) - a).abs() < tol);
        prop_assert!((area(&reversed) - a).abs() < tol);
    }

    #[test]
    fn overlap_is_symmetric(p in ring(), q in ring()) {
        prop_assert_eq!(polygons_overlap(&p, &q), polygons_overlap(&q, &p));
    }

    #[test]
    fn simplify_is_idempotent(
        pts in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 0..30)
    ) {
        let path: Vec<GeoPoint> = pts.into_iter().map(|(x, y)| at(x, y)).collect();
        let once = simplify(&path, 2.0);
        prop_assert_eq!(simplify(&once, 2.0), once);
    }
}
