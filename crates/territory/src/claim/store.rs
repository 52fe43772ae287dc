//! Persistence port.
//!
//! The engine never talks to storage itself. Callers implement
//! `TerritoryStore` over their document store; `claim_and_commit` reads one
//! snapshot, resolves the claim against it, and hands the whole result to a
//! single `commit` so the store can apply it in one transaction.

use std::collections::HashMap;
use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cfg::ClaimCfg;
use super::error::ClaimError;
use super::resolve::{process_new_claim, validate, CarveResult, UserStatsDelta};
use super::territory::Territory;

pub trait TerritoryStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Consistent read of every current territory.
    fn snapshot(&self) -> Result<Vec<Territory>, Self::Error>;

    /// Apply create/update/delete and the stats delta atomically.
    fn commit(&mut self, result: &CarveResult, stats: &UserStatsDelta) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum CommitError<E: std::error::Error + 'static> {
    #[error("claim rejected: {0}")]
    Rejected(#[from] ClaimError),
    #[error("territory store failed: {0}")]
    Store(#[source] E),
}

/// Validate `territory`, resolve it against a fresh snapshot, and commit.
pub fn claim_and_commit<S: TerritoryStore>(
    store: &mut S,
    territory: Territory,
    cfg: &ClaimCfg,
) -> Result<CarveResult, CommitError<S::Error>> {
    validate(&territory, cfg)?;
    let existing = store.snapshot().map_err(CommitError::Store)?;
    let stats = UserStatsDelta::for_claim(&territory);
    let result = process_new_claim(territory, &existing, cfg);
    store.commit(&result, &stats).map_err(CommitError::Store)?;
    Ok(result)
}

/// Running totals per owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub territories_count: i64,
    pub total_area_claimed_m2: f64,
}

/// Store kept entirely in memory; backs the CLI and tests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryStore {
    pub territories: Vec<Territory>,
    #[serde(default)]
    pub stats: HashMap<String, UserStats>,
}

impl InMemoryStore {
    pub fn new(territories: Vec<Territory>) -> Self {
        Self {
            territories,
            stats: HashMap::new(),
        }
    }
}

impl TerritoryStore for InMemoryStore {
    type Error = Infallible;

    fn snapshot(&self) -> Result<Vec<Territory>, Self::Error> {
        Ok(self.territories.clone())
    }

    fn commit(&mut self, result: &CarveResult, stats: &UserStatsDelta) -> Result<(), Self::Error> {
        self.territories
            .retain(|t| !result.deleted_territory_ids.contains(&t.id));
        for updated in &result.updated_territories {
            if let Some(slot) = self.territories.iter_mut().find(|t| t.id == updated.id) {
                *slot = updated.clone();
            }
        }
        self.territories.push(result.new_territory.clone());

        let entry = self.stats.entry(stats.owner_id.clone()).or_default();
        entry.territories_count += stats.territory_count;
        entry.total_area_claimed_m2 += stats.area_added_m2;
        Ok(())
    }
}
