//! Resolution of a new claim against the existing territory set.
//!
//! Territory sets come in by slice (a snapshot read by the caller) and results
//! go out as plain instructions; nothing here holds on to the set.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::polygon::area;

use super::cfg::ClaimCfg;
use super::error::ClaimError;
use super::territory::Territory;

/// Create/update/delete instructions produced by one claim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarveResult {
    pub new_territory: Territory,
    /// Shrunk but still valid; same ids as before.
    pub updated_territories: Vec<Territory>,
    /// Consumed or shrunk below the minimum size.
    pub deleted_territory_ids: Vec<String>,
}

/// Per-user statistics change to apply together with a `CarveResult`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserStatsDelta {
    pub owner_id: String,
    pub territory_count: i64,
    pub area_added_m2: f64,
}

impl UserStatsDelta {
    pub fn for_claim(territory: &Territory) -> Self {
        Self {
            owner_id: territory.owner_id.clone(),
            territory_count: 1,
            area_added_m2: territory.area(),
        }
    }
}

/// Gate before persistence: coordinates, vertex count, minimum size.
pub fn validate(territory: &Territory, cfg: &ClaimCfg) -> Result<(), ClaimError> {
    if !territory.polygon.points().iter().all(GeoPoint::is_valid) {
        return Err(ClaimError::InvalidCoordinate);
    }
    if territory.polygon.vertex_count() < 3 {
        return Err(ClaimError::DegeneratePolygon);
    }
    let a = territory.area();
    if a < cfg.min_area_m2 {
        return Err(ClaimError::TerritoryTooSmall {
            deficit_m2: cfg.min_area_m2 - a,
        });
    }
    Ok(())
}

/// Existing territories of other owners that overlap `new_territory`.
pub fn find_overlaps(new_territory: &Territory, existing: &[Territory]) -> Vec<Territory> {
    existing
        .iter()
        .filter(|t| t.owner_id != new_territory.owner_id && new_territory.overlaps(t))
        .cloned()
        .collect()
}

/// Carve every overlapping foreign territory with `new_territory`.
///
/// Own territories are never touched. The new territory is always part of the
/// result.
pub fn process_new_claim(
    new_territory: Territory,
    existing: &[Territory],
    cfg: &ClaimCfg,
) -> CarveResult {
    let mut updated_territories = Vec::new();
    let mut deleted_territory_ids = Vec::new();
    for victim in find_overlaps(&new_territory, existing) {
        match victim.carved_by(&new_territory, cfg.min_area_m2) {
            Some(rest) => {
                tracing::debug!(id = %rest.id, area_m2 = rest.area(), "territory carved");
                updated_territories.push(rest);
            }
            None => {
                tracing::debug!(id = %victim.id, "territory consumed");
                deleted_territory_ids.push(victim.id);
            }
        }
    }
    tracing::info!(
        id = %new_territory.id,
        updated = updated_territories.len(),
        deleted = deleted_territory_ids.len(),
        "claim resolved"
    );
    CarveResult {
        new_territory,
        updated_territories,
        deleted_territory_ids,
    }
}

/// Territories whose polygon contains `point`.
pub fn territories_containing<'a>(
    point: GeoPoint,
    territories: &'a [Territory],
) -> Vec<&'a Territory> {
    territories.iter().filter(|t| t.contains(point)).collect()
}

pub fn total_area(owner_id: &str, territories: &[Territory]) -> f64 {
    territories
        .iter()
        .filter(|t| t.owner_id == owner_id)
        .map(Territory::area)
        .sum()
}

pub fn territory_count(owner_id: &str, territories: &[Territory]) -> usize {
    territories.iter().filter(|t| t.owner_id == owner_id).count()
}

/// At least 3 valid coordinates enclosing a positive area.
pub fn is_valid_polygon(points: &[GeoPoint]) -> bool {
    points.len() >= 3 && points.iter().all(GeoPoint::is_valid) && area(points) > 0.0
}
