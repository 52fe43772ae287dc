//! Claiming state machine for one user walking one loop.
//!
//! ```text
//! Idle ──start──▶ Tracking ──(auto close | force_claim)──▶ Validating ──▶ Accepted | Rejected
//!  ▲                 │                                                        │
//!  └──cancel/reset───┴────────────────────────start (new attempt)─────────────┘
//! ```
//!
//! The session exclusively owns the sample buffer of the current attempt.
//! Cancelling is a pure reset; nothing outside the session is touched.

use chrono::Utc;

use crate::geo::PathSample;

use super::cfg::ClaimCfg;
use super::detect::{detect_polygon, ClaimOutcome, ClaimProgress};
use super::error::ClaimError;
use super::territory::{Claimant, Territory};

#[derive(Clone, Debug, PartialEq)]
pub enum ClaimState {
    Idle,
    Tracking,
    Validating,
    Accepted(Territory),
    Rejected(ClaimError),
}

impl ClaimState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimState::Accepted(_) | ClaimState::Rejected(_))
    }
}

/// What `push_sample` did with a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDisposition {
    /// Buffered; still tracking.
    Appended,
    /// Buffered, the loop closed, and validation ran.
    Completed,
    /// Dropped for poor or invalid accuracy, or an implausible coordinate.
    Filtered,
    /// Dropped because the session is not tracking.
    Ignored,
}

#[derive(Clone, Debug)]
pub struct ClaimSession {
    cfg: ClaimCfg,
    claimant: Claimant,
    state: ClaimState,
    samples: Vec<PathSample>,
    progress: ClaimProgress,
}

impl ClaimSession {
    pub fn new(claimant: Claimant, cfg: ClaimCfg) -> Self {
        Self {
            cfg,
            claimant,
            state: ClaimState::Idle,
            samples: Vec::new(),
            progress: ClaimProgress::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> &ClaimState {
        &self.state
    }

    #[inline]
    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    #[inline]
    pub fn progress(&self) -> ClaimProgress {
        self.progress
    }

    #[inline]
    pub fn cfg(&self) -> &ClaimCfg {
        &self.cfg
    }

    /// Begin a fresh attempt from any state.
    pub fn start(&mut self) {
        self.clear();
        self.state = ClaimState::Tracking;
    }

    /// Abandon the attempt and return to `Idle`.
    pub fn cancel(&mut self) {
        self.clear();
        self.state = ClaimState::Idle;
    }

    /// Alias of `cancel`, used after an accepted/rejected attempt was handled.
    pub fn reset(&mut self) {
        self.cancel();
    }

    fn clear(&mut self) {
        self.samples.clear();
        self.progress = ClaimProgress::default();
    }

    /// Feed one location fix. While tracking, closes the loop automatically
    /// once the minimums are met and the walker is back near the start.
    pub fn push_sample(&mut self, sample: PathSample) -> SampleDisposition {
        if !matches!(self.state, ClaimState::Tracking) {
            return SampleDisposition::Ignored;
        }
        // negative accuracy marks an invalid fix; NaN falls outside the range too
        if !(0.0..=self.cfg.max_accuracy_m).contains(&sample.accuracy_m)
            || !sample.point.is_plausible()
        {
            tracing::debug!(accuracy_m = sample.accuracy_m, "sample filtered");
            return SampleDisposition::Filtered;
        }
        self.samples.push(sample);
        self.progress = ClaimProgress::from_samples(&self.samples);

        if self.progress.meets_minimums(&self.cfg)
            && self.progress.distance_to_start_m <= self.cfg.loop_closure_m
        {
            tracing::debug!(
                points = self.progress.point_count,
                path_length_m = self.progress.path_length_m,
                "loop closed"
            );
            self.validate();
            return SampleDisposition::Completed;
        }
        SampleDisposition::Appended
    }

    /// Manual claim without loop closure is allowed once
    /// `ClaimProgress::is_ready_to_close` holds.
    #[inline]
    pub fn can_force_claim(&self) -> bool {
        matches!(self.state, ClaimState::Tracking) && self.progress.is_ready_to_close(&self.cfg)
    }

    /// Validate now. Refused (state unchanged) unless `can_force_claim`.
    pub fn force_claim(&mut self) -> Result<&ClaimState, ClaimError> {
        if !self.can_force_claim() {
            return Err(ClaimError::NotReady);
        }
        self.validate();
        Ok(&self.state)
    }

    fn validate(&mut self) {
        self.state = ClaimState::Validating;
        // claimed at the closing sample, so replays are deterministic
        let claimed_at = self
            .samples
            .last()
            .map(|s| s.timestamp)
            .unwrap_or_else(Utc::now);
        self.state = match detect_polygon(&self.samples, &self.cfg) {
            ClaimOutcome::Valid { polygon, .. } => {
                ClaimState::Accepted(Territory::new(&self.claimant, polygon, claimed_at))
            }
            ClaimOutcome::Invalid(e) => ClaimState::Rejected(e),
        };
    }

    /// Human-readable status line for the current state.
    pub fn status_message(&self) -> String {
        let p = &self.progress;
        let cfg = &self.cfg;
        match &self.state {
            ClaimState::Idle => "Tap 'Start Claiming' to begin".to_string(),
            ClaimState::Tracking if p.point_count < cfg.min_points => {
                format!("Keep walking... ({}/{} points)", p.point_count, cfg.min_points)
            }
            ClaimState::Tracking if p.path_length_m < cfg.min_path_length_m => format!(
                "Path: {:.0}m / {:.0}m minimum",
                p.path_length_m, cfg.min_path_length_m
            ),
            ClaimState::Tracking if p.estimated_area_m2 < cfg.min_area_m2 => format!(
                "Area: {:.0}m² / {:.0}m² minimum",
                p.estimated_area_m2, cfg.min_area_m2
            ),
            ClaimState::Tracking => {
                format!("Return to start! Distance: {:.0}m", p.distance_to_start_m)
            }
            ClaimState::Validating => "Validating your territory...".to_string(),
            ClaimState::Accepted(_) => "Territory claimed!".to_string(),
            ClaimState::Rejected(e) => e.to_string(),
        }
    }
}
