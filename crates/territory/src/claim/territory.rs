//! Claimed territory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::GeoPoint;
use crate::polygon::{point_in_polygon, polygons_overlap, subtract, Polygon};

/// Display palette; owners map onto it deterministically.
pub const PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8B500", "#58D68D",
];

/// Identity of the user making a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimant {
    pub owner_id: String,
    pub owner_name: String,
}

impl Claimant {
    pub fn new(owner_id: impl Into<String>, owner_name: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            owner_name: owner_name.into(),
        }
    }
}

/// A polygon owned by one user.
///
/// Area, centroid and radius are derived from `polygon` on every call and are
/// never stored. Carving produces a new value with the same id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub polygon: Polygon,
    pub claimed_at: DateTime<Utc>,
    pub color: String,
}

impl Territory {
    /// Fresh territory with a time-ordered UUID and the owner's palette colour.
    pub fn new(claimant: &Claimant, polygon: Polygon, claimed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            owner_id: claimant.owner_id.clone(),
            owner_name: claimant.owner_name.clone(),
            polygon,
            claimed_at,
            color: color_for_user(&claimant.owner_id).to_string(),
        }
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.polygon.area()
    }

    #[inline]
    pub fn centroid(&self) -> Option<GeoPoint> {
        self.polygon.centroid()
    }

    #[inline]
    pub fn approximate_radius(&self) -> f64 {
        self.polygon.approximate_radius()
    }

    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point_in_polygon(point, self.polygon.points())
    }

    #[inline]
    pub fn overlaps(&self, other: &Territory) -> bool {
        polygons_overlap(self.polygon.points(), other.polygon.points())
    }

    /// Remainder after `carver` takes its share, or `None` when consumed.
    pub fn carved_by(&self, carver: &Territory, min_area_m2: f64) -> Option<Territory> {
        let polygon = subtract(&self.polygon, &carver.polygon, min_area_m2)?;
        Some(Territory {
            polygon,
            ..self.clone()
        })
    }

    #[inline]
    pub fn is_valid_size(&self, min_area_m2: f64) -> bool {
        self.area() >= min_area_m2
    }
}

/// Stable palette colour for an owner id (FNV-1a over the id bytes).
pub fn color_for_user(owner_id: &str) -> &'static str {
    let hash = owner_id
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        });
    PALETTE[(hash % PALETTE.len() as u64) as usize]
}
