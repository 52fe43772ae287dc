//! Claim thresholds.
//!
//! Policy
//! - One `ClaimCfg` carries every tunable; `Default` holds the product values.
//! - Deserializable with per-field defaults so partial config files work.

use serde::{Deserialize, Serialize};

/// Minimum territory area: a disc of 25 m radius (≈ 1963.5 m²).
pub const MIN_AREA_M2: f64 = std::f64::consts::PI * 25.0 * 25.0;
/// Spacing of synthesized samples when filling a signal gap.
pub const INTERPOLATION_STEP_S: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimCfg {
    pub min_points: usize,
    pub min_path_length_m: f64,
    /// Max start/end distance for a path to count as a closed loop.
    pub loop_closure_m: f64,
    pub min_area_m2: f64,
    /// Douglas-Peucker tolerance.
    pub simplify_epsilon_m: f64,
    pub smoothing_window: usize,
    /// Sample gaps longer than this are filled by interpolation.
    pub max_gap_s: f64,
    /// Share of `min_area_m2` the open path must already enclose for a manual claim.
    pub force_claim_area_ratio: f64,
    /// Samples with worse horizontal accuracy are dropped while tracking.
    pub max_accuracy_m: f64,
}

impl Default for ClaimCfg {
    fn default() -> Self {
        Self {
            min_points: 10,
            min_path_length_m: 50.0,
            loop_closure_m: 15.0,
            min_area_m2: MIN_AREA_M2,
            simplify_epsilon_m: 2.0,
            smoothing_window: 3,
            max_gap_s: 10.0,
            force_claim_area_ratio: 0.8,
            max_accuracy_m: 20.0,
        }
    }
}
