//! Claims desk: eligibility, submission, status tracking.
//!
//! Claims are generated from encounters that have reached the billing desk
//! or been closed. Adjudication itself is external; the simulated insurer
//! bridge in [`bridge`] advances freshly submitted claims after a delay.

mod bridge;

pub use bridge::*;

use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{Claim, ClaimStatus, Encounter, EncounterStatus};

/// Claims errors.
#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Invalid claim: {0}")]
    Validation(String),

    #[error("Claim not found: {0}")]
    NotFound(String),
}

pub type ClaimsResult<T> = Result<T, ClaimsError>;

/// Check whether an encounter is ready for claim submission.
pub fn is_claimable(encounter: &Encounter) -> bool {
    matches!(
        encounter.status,
        EncounterStatus::Billing | EncounterStatus::Finished
    )
}

/// Claim generation and tracking over the store.
pub struct ClaimsDesk<'a> {
    db: &'a Database,
}

impl<'a> ClaimsDesk<'a> {
    /// Create a claims desk over the store.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Snapshot of the encounters ready for claim submission.
    pub fn eligible_for_claim(&self) -> ClaimsResult<Vec<Encounter>> {
        Ok(self.db.list_claimable_encounters()?)
    }

    /// Submit a claim for an eligible encounter.
    ///
    /// The claimed amount is copied from the encounter's charge at this
    /// moment and never re-synced. The claim id is regenerated while it
    /// collides with an existing one.
    pub fn submit(&self, encounter_id: &str, provider_id: &str) -> ClaimsResult<Claim> {
        let encounter = self.db.get_encounter(encounter_id)?.ok_or_else(|| {
            ClaimsError::Validation(format!("Unknown encounter: {}", encounter_id))
        })?;
        if !is_claimable(&encounter) {
            return Err(ClaimsError::Validation(format!(
                "Encounter {} is not ready for claim (status: {})",
                encounter_id,
                encounter.status.as_str()
            )));
        }
        if self.db.get_insurer(provider_id)?.is_none() {
            return Err(ClaimsError::Validation(format!(
                "Unknown insurance provider: {}",
                provider_id
            )));
        }

        let amount = encounter.total_charge.unwrap_or(0.0);
        let mut claim = Claim::new(encounter_id.to_string(), provider_id.to_string(), amount);
        while self.db.get_claim(&claim.id)?.is_some() {
            claim.id = crate::models::generate_claim_id();
        }

        self.db.insert_claim(&claim)?;
        Ok(claim)
    }

    /// Get a claim by ID.
    pub fn get(&self, claim_id: &str) -> ClaimsResult<Option<Claim>> {
        Ok(self.db.get_claim(claim_id)?)
    }

    /// List all claims.
    pub fn list(&self) -> ClaimsResult<Vec<Claim>> {
        Ok(self.db.list_claims()?)
    }

    /// Overwrite a claim's status.
    ///
    /// Any target status is accepted, but a move to an earlier pipeline
    /// stage is flagged as suspicious before being applied.
    pub fn update_status(&self, claim_id: &str, status: ClaimStatus) -> ClaimsResult<Claim> {
        let current = self
            .db
            .get_claim(claim_id)?
            .ok_or_else(|| ClaimsError::NotFound(claim_id.to_string()))?;

        if status.stage() < current.status.stage() {
            tracing::warn!(
                claim_id = %claim_id,
                from = current.status.as_str(),
                to = status.as_str(),
                "out-of-order claim status overwrite"
            );
        }

        self.db.update_claim_status(claim_id, status)?;
        Ok(Claim {
            status,
            ..current
        })
    }
}
