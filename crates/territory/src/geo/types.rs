//! Coordinate and sample value types.
//!
//! - `GeoPoint`: WGS84 latitude/longitude in degrees; serializes as `[lat, lon]`.
//! - `PathSample`: one fix from the location stream (point, time, accuracy).
//! - `BoundingBox`: axis-aligned lat/lon box used for cheap rejection tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees.
///
/// Invariants (checked by `is_valid`, not enforced at construction):
/// - `lat ∈ [-90, 90]`, `lon ∈ [-180, 180]`, both finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Finite and inside the WGS84 degree ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Valid and off the zero axes. Devices without a fix report `0.0` for
    /// either component, so those readings are rejected as implausible.
    #[inline]
    pub fn is_plausible(&self) -> bool {
        self.is_valid() && self.lat != 0.0 && self.lon != 0.0
    }

    /// Linear interpolation in degree space; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(&self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + t * (other.lat - self.lat),
            lon: self.lon + t * (other.lon - self.lon),
        }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> Self {
        [p.lat, p.lon]
    }
}

/// A single location fix as delivered by the external location stream.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    pub point: GeoPoint,
    pub timestamp: DateTime<Utc>,
    /// Horizontal accuracy radius in metres (smaller is better).
    pub accuracy_m: f64,
}

impl PathSample {
    #[inline]
    pub fn new(point: GeoPoint, timestamp: DateTime<Utc>, accuracy_m: f64) -> Self {
        Self {
            point,
            timestamp,
            accuracy_m,
        }
    }

    /// Signed seconds from `earlier` to `self` (millisecond resolution).
    #[inline]
    pub fn seconds_since(&self, earlier: &PathSample) -> f64 {
        (self.timestamp - earlier.timestamp).num_milliseconds() as f64 / 1000.0
    }
}

/// Axis-aligned box in degree space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl BoundingBox {
    /// Smallest box covering `points`; `None` when empty.
    pub fn around(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut b = BoundingBox {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            b.min.lat = b.min.lat.min(p.lat);
            b.min.lon = b.min.lon.min(p.lon);
            b.max.lat = b.max.lat.max(p.lat);
            b.max.lon = b.max.lon.max(p.lon);
        }
        Some(b)
    }

    /// Closed-interval overlap on both axes (touching boxes intersect).
    #[inline]
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max.lat < other.min.lat
            || self.min.lat > other.max.lat
            || self.max.lon < other.min.lon
            || self.min.lon > other.max.lon)
    }

    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        (self.min.lat..=self.max.lat).contains(&p.lat)
            && (self.min.lon..=self.max.lon).contains(&p.lon)
    }

    #[inline]
    pub fn center(&self) -> GeoPoint {
        self.min.lerp(self.max, 0.5)
    }
}
