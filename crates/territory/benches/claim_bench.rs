//! Criterion benchmarks for the claim pipeline.
//! Focus sizes: walk spacing in {1, 2, 5} m around a 200 m square.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p territory

use chrono::{DateTime, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use territory::claim::{detect_polygon, process_new_claim, ClaimCfg, Claimant, Territory};
use territory::geo::{GeoPoint, PathSample};
use territory::polygon::{polygons_overlap, simplify, Polygon};
use territory::sim::{draw_walk, ReplayToken, WalkCfg, WalkShape};

const ORIGIN: GeoPoint = GeoPoint::new(47.3769, 8.5417);

fn jittered_walk(side_m: f64, spacing_m: f64, seed: u64) -> Vec<PathSample> {
    let cfg = WalkCfg {
        shape: WalkShape::Square { side_m },
        spacing_m,
        jitter_m: 1.5,
        ..WalkCfg::default()
    };
    let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
    draw_walk(cfg, ORIGIN, start, ReplayToken { seed, index: 0 })
}

fn walk_points(samples: &[PathSample]) -> Vec<GeoPoint> {
    samples.iter().map(|s| s.point).collect()
}

fn bench_claim(c: &mut Criterion) {
    let cfg = ClaimCfg::default();
    let mut group = c.benchmark_group("claim");
    for &spacing in &[1.0f64, 2.0, 5.0] {
        let n = (800.0 / spacing) as usize;
        group.bench_with_input(BenchmarkId::new("detect_polygon", n), &spacing, |b, &s| {
            b.iter_batched(
                || jittered_walk(200.0, s, 41),
                |walk| {
                    let _outcome = detect_polygon(&walk, &cfg);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("simplify", n), &spacing, |b, &s| {
            let pts = walk_points(&jittered_walk(200.0, s, 42));
            b.iter(|| simplify(&pts, cfg.simplify_epsilon_m))
        });

        group.bench_with_input(BenchmarkId::new("polygons_overlap", n), &spacing, |b, &s| {
            let a = walk_points(&jittered_walk(200.0, s, 43));
            let other = walk_points(&jittered_walk(150.0, s, 44));
            b.iter(|| polygons_overlap(&a, &other))
        });
    }

    group.bench_function("process_new_claim_10", |b| {
        let owner = Claimant::new("bench", "Bench");
        let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_default();
        let existing: Vec<Territory> = (0..10)
            .map(|k| {
                let rival = Claimant::new(format!("rival-{k}"), "Rival");
                let walk = jittered_walk(80.0 + 10.0 * k as f64, 5.0, 100 + k);
                Territory::new(&rival, Polygon::new(walk_points(&walk)).closed(), start)
            })
            .collect();
        let new_polygon = Polygon::new(walk_points(&jittered_walk(120.0, 5.0, 7))).closed();
        b.iter_batched(
            || Territory::new(&owner, new_polygon.clone(), start),
            |t| {
                let _res = process_new_claim(t, &existing, &cfg);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_claim);
criterion_main!(benches);
