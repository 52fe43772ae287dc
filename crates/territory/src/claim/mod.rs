//! Claim pipeline: walk → validated territory → carve resolution.
//!
//! Purpose
//! - `detect_polygon` turns recorded samples into a territory polygon or a
//!   structured rejection.
//! - `ClaimSession` drives one attempt (Idle → Tracking → Validating →
//!   Accepted | Rejected) from a stream of samples.
//! - `process_new_claim` carves a freshly accepted territory into foreign
//!   territories it overlaps and reports update/delete instructions.
//!
//! Design
//! - Pure functions over values. The only mutable state is the sample buffer
//!   owned by a `ClaimSession`; storage is reached through `TerritoryStore`.
//! - Thresholds come from `ClaimCfg`; nothing reads globals.

mod cfg;
mod detect;
mod error;
mod resolve;
mod session;
mod store;
mod territory;

pub use cfg::{ClaimCfg, INTERPOLATION_STEP_S, MIN_AREA_M2};
pub use detect::{
    can_form_valid_territory, detect_polygon, distance_to_close, process_path_with_interpolation,
    ClaimOutcome, ClaimProgress,
};
pub use error::{ClaimError, ErrorKind};
pub use resolve::{
    find_overlaps, is_valid_polygon, process_new_claim, territories_containing, territory_count,
    total_area, validate, CarveResult, UserStatsDelta,
};
pub use session::{ClaimSession, ClaimState, SampleDisposition};
pub use store::{claim_and_commit, CommitError, InMemoryStore, TerritoryStore, UserStats};
pub use territory::{color_for_user, Claimant, Territory, PALETTE};
