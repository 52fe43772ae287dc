//! Path → polygon detection.
//!
//! Pipeline (short-circuits on the first failure):
//! 1. point count, 2. path length, 3. loop closure (on raw samples);
//! 4. gap interpolation, 5. smoothing, 6. largest-loop resolution,
//! 7. Douglas-Peucker, 8. force-close, 9. vertex count, 10. minimum area.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::geo::{distance, path_length, GeoPoint, PathSample};
use crate::polygon::{area, find_largest_loop, simplify, smooth, Polygon};

use super::cfg::{ClaimCfg, INTERPOLATION_STEP_S};
use super::error::ClaimError;

/// Result of running detection once.
#[derive(Clone, Debug, PartialEq)]
pub enum ClaimOutcome {
    Valid { polygon: Polygon, area_m2: f64 },
    Invalid(ClaimError),
}

impl ClaimOutcome {
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, ClaimOutcome::Valid { .. })
    }

    pub fn into_result(self) -> Result<(Polygon, f64), ClaimError> {
        match self {
            ClaimOutcome::Valid { polygon, area_m2 } => Ok((polygon, area_m2)),
            ClaimOutcome::Invalid(e) => Err(e),
        }
    }
}

fn coordinates(samples: &[PathSample]) -> Vec<GeoPoint> {
    samples.iter().map(|s| s.point).collect()
}

/// Start-to-end distance of the walk so far; `None` when empty.
pub fn distance_to_close(samples: &[PathSample]) -> Option<f64> {
    Some(distance(samples.first()?.point, samples.last()?.point))
}

/// Analyze a recorded walk and build the territory polygon it encloses.
pub fn detect_polygon(samples: &[PathSample], cfg: &ClaimCfg) -> ClaimOutcome {
    match detect(samples, cfg) {
        Ok((polygon, area_m2)) => {
            tracing::info!(area_m2, vertices = polygon.len(), "territory detected");
            ClaimOutcome::Valid { polygon, area_m2 }
        }
        Err(e) => {
            tracing::info!(kind = ?e.kind(), reason = %e, "territory rejected");
            ClaimOutcome::Invalid(e)
        }
    }
}

fn detect(samples: &[PathSample], cfg: &ClaimCfg) -> Result<(Polygon, f64), ClaimError> {
    if samples.len() < cfg.min_points {
        return Err(ClaimError::InsufficientPoints {
            have: samples.len(),
            need: cfg.min_points,
        });
    }

    let length_m = path_length(&coordinates(samples));
    if length_m < cfg.min_path_length_m {
        return Err(ClaimError::PathTooShort {
            length_m,
            need_m: cfg.min_path_length_m,
        });
    }

    let gap = distance_to_close(samples).unwrap_or(0.0);
    if gap > cfg.loop_closure_m {
        return Err(ClaimError::LoopNotClosed {
            distance_remaining_m: gap,
        });
    }

    let filled = process_path_with_interpolation(samples, cfg.max_gap_s);
    let smoothed = smooth(&coordinates(&filled), cfg.smoothing_window);
    let looped = find_largest_loop(&smoothed).unwrap_or(smoothed);
    let polygon = Polygon::new(simplify(&looped, cfg.simplify_epsilon_m)).closed();

    // 3 distinct vertices plus the closing duplicate
    if polygon.len() < 4 {
        return Err(ClaimError::TerritoryTooSimple);
    }

    let area_m2 = polygon.area();
    if area_m2 < cfg.min_area_m2 {
        return Err(ClaimError::TerritoryTooSmall {
            deficit_m2: cfg.min_area_m2 - area_m2,
        });
    }
    Ok((polygon, area_m2))
}

/// Fill signal gaps longer than `max_gap_s` with linearly interpolated samples,
/// one per `INTERPOLATION_STEP_S` of gap. Synthesized samples carry the worse
/// accuracy of their two neighbours. Original samples are kept as-is.
pub fn process_path_with_interpolation(samples: &[PathSample], max_gap_s: f64) -> Vec<PathSample> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(samples.len());
    out.push(*first);
    for w in samples.windows(2) {
        let (prev, curr) = (w[0], w[1]);
        let dt = curr.seconds_since(&prev);
        if dt > max_gap_s {
            let steps = (dt / INTERPOLATION_STEP_S).floor() as usize;
            for j in 1..steps {
                let f = j as f64 / steps as f64;
                let offset_ms = (dt * f * 1000.0).round() as i64;
                out.push(PathSample {
                    point: prev.point.lerp(curr.point, f),
                    timestamp: prev.timestamp + Duration::milliseconds(offset_ms),
                    accuracy_m: prev.accuracy_m.max(curr.accuracy_m),
                });
            }
        }
        out.push(curr);
    }
    out
}

/// Live metrics for an in-progress walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimProgress {
    pub path_length_m: f64,
    pub point_count: usize,
    pub distance_to_start_m: f64,
    /// Area enclosed if the loop were closed straight back to the start now.
    pub estimated_area_m2: f64,
}

impl ClaimProgress {
    pub fn from_samples(samples: &[PathSample]) -> Self {
        let coords = coordinates(samples);
        let path_length_m = path_length(&coords);
        let estimated_area_m2 = if coords.len() >= 3 {
            Polygon::new(coords).closed().area()
        } else {
            0.0
        };
        Self {
            path_length_m,
            point_count: samples.len(),
            distance_to_start_m: distance_to_close(samples).unwrap_or(0.0),
            estimated_area_m2,
        }
    }

    pub fn path_length_ratio(&self, cfg: &ClaimCfg) -> f64 {
        (self.path_length_m / cfg.min_path_length_m).min(1.0)
    }

    pub fn point_count_ratio(&self, cfg: &ClaimCfg) -> f64 {
        (self.point_count as f64 / cfg.min_points as f64).min(1.0)
    }

    pub fn area_ratio(&self, cfg: &ClaimCfg) -> f64 {
        (self.estimated_area_m2 / cfg.min_area_m2).min(1.0)
    }

    /// Point count and path length met.
    pub fn meets_minimums(&self, cfg: &ClaimCfg) -> bool {
        self.point_count >= cfg.min_points && self.path_length_m >= cfg.min_path_length_m
    }

    /// Minimums met and the open path already encloses most of the required area.
    pub fn is_ready_to_close(&self, cfg: &ClaimCfg) -> bool {
        self.meets_minimums(cfg)
            && self.estimated_area_m2 >= cfg.min_area_m2 * cfg.force_claim_area_ratio
    }
}

/// Cheap pre-check on raw samples: enough points and enough enclosed area.
pub fn can_form_valid_territory(samples: &[PathSample], cfg: &ClaimCfg) -> Result<(), ClaimError> {
    if samples.len() < cfg.min_points {
        return Err(ClaimError::InsufficientPoints {
            have: samples.len(),
            need: cfg.min_points,
        });
    }
    let a = area(&coordinates(samples));
    if a < cfg.min_area_m2 {
        return Err(ClaimError::TerritoryTooSmall {
            deficit_m2: cfg.min_area_m2 - a,
        });
    }
    Ok(())
}
