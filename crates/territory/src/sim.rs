//! Synthetic GPS walks (outline + jitter + replay tokens).
//!
//! Purpose
//! - Deterministic sample streams for tests, benches and the CLI `simulate`
//!   command, without a device in the loop.
//!
//! Model
//! - A closed outline in local metres (x east, y north) is walked at a fixed
//!   spacing from its start back to its start; each fix gets bounded uniform
//!   jitter and a fixed time step, then is placed on the globe via `geo::offset`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::f64::consts::TAU;

use chrono::{DateTime, Duration, Utc};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::geo::{offset, GeoPoint, PathSample};

/// Outline walked by the simulated user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkShape {
    /// Axis-aligned square, counter-clockwise from its south-west corner.
    Square { side_m: f64 },
    /// Circle centred on the origin, starting due east.
    Circle { radius_m: f64 },
    /// Lemniscate through the origin; crosses itself once.
    FigureEight { radius_m: f64 },
}

const OUTLINE_RESOLUTION: usize = 512;

impl WalkShape {
    /// Position at arc parameter `u ∈ [0, 1]`; `u = 0` and `u = 1` coincide.
    fn at(&self, u: f64) -> Vector2<f64> {
        let u = u.clamp(0.0, 1.0);
        match *self {
            WalkShape::Square { side_m: s } => {
                let d = u * 4.0;
                let k = d.floor().min(3.0);
                let t = d - k;
                match k as usize {
                    0 => Vector2::new(t * s, 0.0),
                    1 => Vector2::new(s, t * s),
                    2 => Vector2::new(s - t * s, s),
                    _ => Vector2::new(0.0, s - t * s),
                }
            }
            WalkShape::Circle { radius_m: r } => {
                let th = TAU * u;
                Vector2::new(r * th.cos(), r * th.sin())
            }
            WalkShape::FigureEight { radius_m: r } => {
                let th = TAU * u;
                let den = 1.0 + th.sin().powi(2);
                Vector2::new(r * th.cos() / den, r * th.sin() * th.cos() / den)
            }
        }
    }

    /// Outline length in metres (polyline estimate for curved shapes).
    pub fn perimeter(&self) -> f64 {
        match *self {
            WalkShape::Square { side_m } => 4.0 * side_m,
            WalkShape::Circle { radius_m } => TAU * radius_m,
            WalkShape::FigureEight { .. } => (0..OUTLINE_RESOLUTION)
                .map(|k| {
                    let a = self.at(k as f64 / OUTLINE_RESOLUTION as f64);
                    let b = self.at((k + 1) as f64 / OUTLINE_RESOLUTION as f64);
                    (b - a).norm()
                })
                .sum(),
        }
    }
}

/// Walk sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkCfg {
    pub shape: WalkShape,
    /// Distance between consecutive fixes along the outline.
    pub spacing_m: f64,
    /// Per-axis uniform jitter amplitude. `0` gives an exact outline.
    pub jitter_m: f64,
    pub interval_s: f64,
    pub accuracy_m: f64,
}

impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            shape: WalkShape::Square { side_m: 50.0 },
            spacing_m: 5.0,
            jitter_m: 0.0,
            interval_s: 3.0,
            accuracy_m: 5.0,
        }
    }
}

/// Replay token to make walks reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Sample a closed walk around `origin`, starting at `start`.
///
/// Returns `ceil(perimeter / spacing) + 1` samples; without jitter the last
/// sample repeats the first position.
pub fn draw_walk(
    cfg: WalkCfg,
    origin: GeoPoint,
    start: DateTime<Utc>,
    tok: ReplayToken,
) -> Vec<PathSample> {
    let mut rng = tok.to_std_rng();
    let n = (cfg.shape.perimeter() / cfg.spacing_m.max(1e-3)).ceil().max(1.0) as usize;
    let step_ms = (cfg.interval_s * 1000.0).round() as i64;
    let jitter = cfg.jitter_m.max(0.0);
    (0..=n)
        .map(|k| {
            let mut p = cfg.shape.at(k as f64 / n as f64);
            if jitter > 0.0 {
                p += Vector2::new(
                    rng.gen_range(-jitter..=jitter),
                    rng.gen_range(-jitter..=jitter),
                );
            }
            PathSample::new(
                offset(origin, p.x, p.y),
                start + Duration::milliseconds(step_ms * k as i64),
                cfg.accuracy_m,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{distance, path_length};

    const ORIGIN: GeoPoint = GeoPoint::new(47.3769, 8.5417);

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn reproducible_draw() {
        let cfg = WalkCfg {
            jitter_m: 1.5,
            ..WalkCfg::default()
        };
        let tok = ReplayToken { seed: 42, index: 7 };
        let a = draw_walk(cfg, ORIGIN, t0(), tok);
        let b = draw_walk(cfg, ORIGIN, t0(), tok);
        assert_eq!(a, b);
        let c = draw_walk(cfg, ORIGIN, t0(), ReplayToken { seed: 42, index: 8 });
        assert_ne!(a, c);
    }

    #[test]
    fn exact_square_walk_is_closed() {
        let walk = draw_walk(WalkCfg::default(), ORIGIN, t0(), ReplayToken { seed: 0, index: 0 });
        assert_eq!(walk.len(), 41);
        let first = walk.first().unwrap();
        let last = walk.last().unwrap();
        assert!(distance(first.point, last.point) < 1e-6);
        assert_eq!(last.seconds_since(first), 120.0);
        let pts: Vec<GeoPoint> = walk.iter().map(|s| s.point).collect();
        assert!((path_length(&pts) - 200.0).abs() < 0.1);
    }

    #[test]
    fn figure_eight_perimeter_is_finite() {
        let p = WalkShape::FigureEight { radius_m: 40.0 }.perimeter();
        assert!(p > 4.0 * 40.0 && p < 8.0 * 40.0);
    }
}
