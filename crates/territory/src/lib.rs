//! Territory claiming from GPS walks.
//!
//! A user walks a closed loop; the recorded samples become a polygon on the
//! globe, which is validated and then carved into the territories of other
//! owners it overlaps.
//!
//! Layout
//! - `geo`: coordinates, samples and spherical distance/bearing.
//! - `polygon`: area, simplification, loop resolution, overlap and carving.
//! - `claim`: detection pipeline, claiming session, resolution, store port.
//! - `sim`: deterministic synthetic walks for tests, benches and the CLI.
//!
//! API Policy
//! - Project-internal crate; breaking changes are fine when they improve the
//!   design. Callers outside the workspace should go through `api`.

pub mod api;
pub mod claim;
pub mod geo;
pub mod polygon;
pub mod sim;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use claim::ClaimCfg;
pub use geo::{GeoPoint, PathSample};
pub use polygon::Polygon;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::claim::{
        detect_polygon, process_new_claim, ClaimCfg, ClaimError, ClaimOutcome, ClaimSession,
        ClaimState, Claimant, Territory,
    };
    pub use crate::geo::{distance, GeoPoint, PathSample};
    pub use crate::polygon::{area, Polygon};
    pub use crate::sim::{draw_walk, ReplayToken, WalkCfg, WalkShape};
}
