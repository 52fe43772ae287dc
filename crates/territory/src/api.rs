//! Curated surface for the CLI and other workspace callers (UNSTABLE).
//!
//! Prefer these re-exports over reaching into submodules; the module layout
//! behind them may move.

// Coordinates and spherical math
pub use crate::geo::{
    bearing, destination, distance, offset, path_length, BoundingBox, GeoPoint, PathSample,
    EARTH_RADIUS_M,
};
// Planar polygon operations
pub use crate::polygon::{
    approximate_radius, area, bounding_box, centroid, find_largest_loop, point_in_polygon,
    polygons_overlap, segments_intersect, self_intersections, simplify, smooth, subtract, Polygon,
};
// Claiming
pub use crate::claim::{
    can_form_valid_territory, claim_and_commit, color_for_user, detect_polygon, distance_to_close,
    find_overlaps, is_valid_polygon, process_new_claim, process_path_with_interpolation,
    territories_containing, territory_count, total_area, validate, CarveResult, ClaimCfg,
    ClaimError, ClaimOutcome, ClaimProgress, ClaimSession, ClaimState, Claimant, CommitError,
    ErrorKind, InMemoryStore, SampleDisposition, Territory, TerritoryStore, UserStats,
    UserStatsDelta, MIN_AREA_M2,
};
// Synthetic walks
pub use crate::sim::{draw_walk, ReplayToken as WalkReplay, WalkCfg, WalkShape};
