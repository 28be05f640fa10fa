//! Read-only census projections for the dashboard.
//!
//! Every number is recomputed by a full scan of the current store, so a
//! displayed figure always equals a fresh count over the snapshot it was
//! taken from. Nothing here mutates state or maintains counters.

use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};
use crate::models::{EncounterStatus, EncounterType, Medicine};

/// Stock level below which a medicine appears in the dashboard alert.
pub const LOW_STOCK_THRESHOLD: i64 = 100;

/// Aggregate KPI snapshot for one facility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CensusReport {
    /// Facility the report was taken for
    pub hospital_id: String,
    /// All encounters at the facility
    pub total_encounters: u32,
    /// Visits by kind
    pub outpatient: u32,
    pub er: u32,
    pub inpatient: u32,
    /// Visits by workflow stage
    pub waiting: u32,
    pub triaged: u32,
    pub in_consultation: u32,
    pub pharmacy_queue: u32,
    pub billing_queue: u32,
    pub finished: u32,
    /// Visits not yet paid
    pub unpaid: u32,
    /// Sum of charges over paid visits
    pub collected_revenue: f64,
}

/// Per-department share of encounters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepartmentCount {
    pub department: String,
    pub count: u32,
}

/// A (department, status) pair, the batch form handed to the insight
/// summarizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncounterDigest {
    pub department: String,
    pub status: String,
}

/// Dashboard projections over the store.
pub struct CensusReporter<'a> {
    db: &'a Database,
}

impl<'a> CensusReporter<'a> {
    /// Create a reporter over the store.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Take the KPI snapshot for a facility.
    pub fn report(&self, hospital_id: &str) -> DbResult<CensusReport> {
        Ok(CensusReport {
            hospital_id: hospital_id.to_string(),
            total_encounters: self.db.count_encounters(hospital_id)?,
            outpatient: self
                .db
                .count_encounters_by_type(hospital_id, EncounterType::Outpatient)?,
            er: self
                .db
                .count_encounters_by_type(hospital_id, EncounterType::Er)?,
            inpatient: self
                .db
                .count_encounters_by_type(hospital_id, EncounterType::Inpatient)?,
            waiting: self
                .db
                .count_encounters_by_status(hospital_id, EncounterStatus::Waiting)?,
            triaged: self
                .db
                .count_encounters_by_status(hospital_id, EncounterStatus::Triaged)?,
            in_consultation: self
                .db
                .count_encounters_by_status(hospital_id, EncounterStatus::Doctor)?,
            pharmacy_queue: self
                .db
                .count_encounters_by_status(hospital_id, EncounterStatus::Pharmacy)?,
            billing_queue: self
                .db
                .count_encounters_by_status(hospital_id, EncounterStatus::Billing)?,
            finished: self
                .db
                .count_encounters_by_status(hospital_id, EncounterStatus::Finished)?,
            unpaid: self.db.count_unpaid_encounters(hospital_id)?,
            collected_revenue: self.db.sum_paid_charges(hospital_id)?,
        })
    }

    /// Per-department encounter counts, largest first.
    pub fn department_mix(&self, hospital_id: &str) -> DbResult<Vec<DepartmentCount>> {
        Ok(self
            .db
            .department_counts(hospital_id)?
            .into_iter()
            .map(|(department, count)| DepartmentCount { department, count })
            .collect())
    }

    /// The (department, status) digest handed to the insight summarizer.
    pub fn encounter_digest(&self, hospital_id: &str) -> DbResult<Vec<EncounterDigest>> {
        Ok(self
            .db
            .encounter_digest(hospital_id)?
            .into_iter()
            .map(|(department, status)| EncounterDigest { department, status })
            .collect())
    }

    /// Medicines below the stock alert threshold.
    pub fn low_stock_medicines(&self) -> DbResult<Vec<Medicine>> {
        self.db.list_low_stock_medicines(LOW_STOCK_THRESHOLD)
    }
}
