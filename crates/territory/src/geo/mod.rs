//! Spherical geodesy on GPS coordinates.
//!
//! Purpose
//! - Distances, bearings and forward projection on a sphere of radius
//!   `EARTH_RADIUS_M` (haversine model). Accurate to well under a metre at the
//!   city-block scale territories live at.
//!
//! Conventions
//! - Degrees at the API boundary, radians only inside the formulas.
//! - No validation: out-of-range inputs produce finite but meaningless output.
//!   Use `GeoPoint::is_valid` where inputs come from outside.

mod sphere;
mod types;

pub use sphere::{bearing, destination, distance, offset, path_length, EARTH_RADIUS_M};
pub use types::{BoundingBox, GeoPoint, PathSample};
