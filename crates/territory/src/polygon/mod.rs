//! Polygons on the sphere at territory scale (tens to hundreds of metres).
//!
//! Purpose
//! - Metrics (area, centroid, bounding box, approximate radius), path
//!   simplification, loop resolution, containment/overlap predicates and
//!   approximate subtraction, all as pure functions over vertex slices.
//!
//! Conventions
//! - Free functions take `&[GeoPoint]` so raw paths and `Polygon`s share one
//!   implementation; `Polygon` wraps them as methods.
//! - Areas and distances are metric (local tangent plane / haversine).
//!   Orientation and containment predicates are planar in lon/lat degrees.
//! - Degenerate input (fewer than 3 vertices, zero area) is signalled through
//!   `0.0`/`None`/`false` results, never a panic.
//!
//! Code cross-refs: `geo::{distance, GeoPoint}`, `claim::detect_polygon`.

pub mod carve;
mod local;
pub mod loops;
pub mod metrics;
pub mod predicates;
pub mod simplify;
mod types;

pub use carve::subtract;
pub use loops::{find_largest_loop, self_intersections, smooth};
pub use metrics::{approximate_radius, area, bounding_box, centroid};
pub use predicates::{point_in_polygon, polygons_overlap, segments_intersect};
pub use simplify::simplify;
pub use types::Polygon;

#[cfg(test)]
mod tests;
