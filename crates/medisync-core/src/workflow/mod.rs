//! Encounter lifecycle management.
//!
//! Owns creation and mutation of the central encounter collection. Every
//! status change goes through the transition rules in [`transitions`];
//! backward moves are rejected and logged rather than silently applied.

mod transitions;

pub use transitions::*;

use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{Encounter, EncounterStatus, EncounterType, SoapNote};

/// Workflow errors.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Invalid encounter: {0}")]
    Validation(String),

    #[error("Encounter not found: {0}")]
    NotFound(String),

    #[error("Illegal transition: {} -> {}", .from.as_str(), .to.as_str())]
    IllegalTransition {
        from: EncounterStatus,
        to: EncounterStatus,
    },
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Lifecycle manager for the encounter collection.
pub struct EncounterWorkflow<'a> {
    db: &'a Database,
}

impl<'a> EncounterWorkflow<'a> {
    /// Create a workflow manager over the store.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Admit a new encounter for a registered patient at a known facility.
    ///
    /// The record starts at `waiting`/`unpaid`; its id is regenerated while
    /// it collides with an existing row.
    pub fn create_encounter(
        &self,
        patient_id: &str,
        hospital_id: &str,
        encounter_type: EncounterType,
        department: &str,
        doctor: &str,
    ) -> WorkflowResult<Encounter> {
        if self.db.get_patient(patient_id)?.is_none() {
            return Err(WorkflowError::Validation(format!(
                "Unknown patient: {}",
                patient_id
            )));
        }
        if self.db.get_hospital(hospital_id)?.is_none() {
            return Err(WorkflowError::Validation(format!(
                "Unknown hospital: {}",
                hospital_id
            )));
        }

        let mut encounter = Encounter::new(
            patient_id.to_string(),
            hospital_id.to_string(),
            encounter_type,
            department.to_string(),
            doctor.to_string(),
        );
        while self.db.get_encounter(&encounter.id)?.is_some() {
            encounter.id = uuid::Uuid::new_v4().to_string();
        }

        self.db.insert_encounter(&encounter)?;
        Ok(encounter)
    }

    /// Replace the stored record matching `updated.id` wholesale.
    ///
    /// Callers merge fields themselves; this is not a partial patch. A
    /// status change smuggled in through the replacement must still be a
    /// legal forward transition.
    pub fn update_encounter(&self, updated: &Encounter) -> WorkflowResult<Encounter> {
        let current = self
            .db
            .get_encounter(&updated.id)?
            .ok_or_else(|| WorkflowError::NotFound(updated.id.clone()))?;

        if updated.status != current.status && !is_forward(current.status, updated.status) {
            tracing::warn!(
                encounter_id = %updated.id,
                from = current.status.as_str(),
                to = updated.status.as_str(),
                "rejected backward encounter transition in update"
            );
            return Err(WorkflowError::IllegalTransition {
                from: current.status,
                to: updated.status,
            });
        }

        self.db.replace_encounter(updated)?;
        Ok(updated.clone())
    }

    /// Advance an encounter to a later workflow stage.
    pub fn advance(&self, id: &str, to: EncounterStatus) -> WorkflowResult<Encounter> {
        let mut encounter = self
            .db
            .get_encounter(id)?
            .ok_or_else(|| WorkflowError::NotFound(id.to_string()))?;

        if !is_forward(encounter.status, to) {
            tracing::warn!(
                encounter_id = %id,
                from = encounter.status.as_str(),
                to = to.as_str(),
                "rejected backward encounter transition"
            );
            return Err(WorkflowError::IllegalTransition {
                from: encounter.status,
                to,
            });
        }

        encounter.status = to;
        self.db.replace_encounter(&encounter)?;
        Ok(encounter)
    }

    /// Finalize a consultation: attach the SOAP note and move the record
    /// to pharmacy. Only valid before the visit has reached pharmacy.
    pub fn advance_to_pharmacy(&self, id: &str, soap: SoapNote) -> WorkflowResult<Encounter> {
        let mut encounter = self
            .db
            .get_encounter(id)?
            .ok_or_else(|| WorkflowError::NotFound(id.to_string()))?;

        if !can_finalize_to_pharmacy(encounter.status) {
            tracing::warn!(
                encounter_id = %id,
                from = encounter.status.as_str(),
                "rejected pharmacy finalization past consultation"
            );
            return Err(WorkflowError::IllegalTransition {
                from: encounter.status,
                to: EncounterStatus::Pharmacy,
            });
        }

        encounter.status = EncounterStatus::Pharmacy;
        encounter.soap = Some(soap);
        self.db.replace_encounter(&encounter)?;
        Ok(encounter)
    }

    /// Get an encounter by ID.
    pub fn get(&self, id: &str) -> WorkflowResult<Option<Encounter>> {
        Ok(self.db.get_encounter(id)?)
    }

    /// Snapshot of the encounters at one facility.
    pub fn by_hospital(&self, hospital_id: &str) -> WorkflowResult<Vec<Encounter>> {
        Ok(self.db.list_encounters_by_hospital(hospital_id)?)
    }

    /// Snapshot of the encounters in one workflow stage.
    pub fn by_status(&self, status: EncounterStatus) -> WorkflowResult<Vec<Encounter>> {
        Ok(self.db.list_encounters_by_status(status)?)
    }

    /// Snapshot of the encounters whose visit is still open.
    pub fn not_finished(&self) -> WorkflowResult<Vec<Encounter>> {
        Ok(self.db.list_unfinished_encounters()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Hospital, Patient};

    fn setup_db() -> (Database, String) {
        let db = Database::open_in_memory().unwrap();
        db.upsert_hospital(&Hospital {
            id: "h1".into(),
            name: "RS Medika Malang".into(),
            code: "MLG".into(),
            location: "Malang".into(),
        })
        .unwrap();
        let patient = Patient::new(
            "MRN-1001".into(),
            "Budi Santoso".into(),
            "1985-05-12".into(),
            Gender::Male,
            "3507121205850001".into(),
        );
        db.insert_patient(&patient).unwrap();
        (db, patient.id)
    }

    #[test]
    fn test_create_encounter_starts_waiting() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let encounter = workflow
            .create_encounter(
                &patient_id,
                "h1",
                EncounterType::Outpatient,
                "General Medicine",
                "Dr. On Duty",
            )
            .unwrap();

        assert_eq!(encounter.status, EncounterStatus::Waiting);
        assert!(workflow.get(&encounter.id).unwrap().is_some());
    }

    #[test]
    fn test_create_rejects_unknown_references() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let result = workflow.create_encounter(
            "ghost",
            "h1",
            EncounterType::Outpatient,
            "General Medicine",
            "Dr. On Duty",
        );
        assert!(matches!(result, Err(WorkflowError::Validation(_))));

        let result = workflow.create_encounter(
            &patient_id,
            "h9",
            EncounterType::Outpatient,
            "General Medicine",
            "Dr. On Duty",
        );
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
    }

    #[test]
    fn test_advance_forward_only() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let encounter = workflow
            .create_encounter(
                &patient_id,
                "h1",
                EncounterType::Er,
                "Emergency",
                "Dr. Smith",
            )
            .unwrap();

        let advanced = workflow
            .advance(&encounter.id, EncounterStatus::Doctor)
            .unwrap();
        assert_eq!(advanced.status, EncounterStatus::Doctor);

        let result = workflow.advance(&encounter.id, EncounterStatus::Waiting);
        assert!(matches!(
            result,
            Err(WorkflowError::IllegalTransition {
                from: EncounterStatus::Doctor,
                to: EncounterStatus::Waiting,
            })
        ));

        // Store untouched by the rejected move
        let stored = workflow.get(&encounter.id).unwrap().unwrap();
        assert_eq!(stored.status, EncounterStatus::Doctor);
    }

    #[test]
    fn test_advance_unknown_id() {
        let (db, _) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let result = workflow.advance("ghost", EncounterStatus::Triaged);
        assert!(matches!(result, Err(WorkflowError::NotFound(_))));
    }

    #[test]
    fn test_advance_to_pharmacy_attaches_note() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let encounter = workflow
            .create_encounter(
                &patient_id,
                "h1",
                EncounterType::Outpatient,
                "General Medicine",
                "Dr. X",
            )
            .unwrap();

        let soap = SoapNote {
            subjective: "fever".into(),
            ..Default::default()
        };
        let finalized = workflow.advance_to_pharmacy(&encounter.id, soap).unwrap();

        assert_eq!(finalized.status, EncounterStatus::Pharmacy);
        assert_eq!(finalized.soap.as_ref().unwrap().subjective, "fever");
    }

    #[test]
    fn test_advance_to_pharmacy_rejected_after_consultation() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let encounter = workflow
            .create_encounter(
                &patient_id,
                "h1",
                EncounterType::Outpatient,
                "General Medicine",
                "Dr. X",
            )
            .unwrap();
        workflow
            .advance(&encounter.id, EncounterStatus::Billing)
            .unwrap();

        let result = workflow.advance_to_pharmacy(&encounter.id, SoapNote::default());
        assert!(matches!(
            result,
            Err(WorkflowError::IllegalTransition { .. })
        ));
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let mut encounter = workflow
            .create_encounter(
                &patient_id,
                "h1",
                EncounterType::Outpatient,
                "General Medicine",
                "Dr. X",
            )
            .unwrap();

        encounter.department = "Internal Medicine".into();
        encounter.total_charge = Some(175_000.0);
        workflow.update_encounter(&encounter).unwrap();

        let stored = workflow.get(&encounter.id).unwrap().unwrap();
        assert_eq!(stored.department, "Internal Medicine");
        assert_eq!(stored.total_charge, Some(175_000.0));
    }

    #[test]
    fn test_update_unknown_id_surfaces_not_found() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let encounter = Encounter::new(
            patient_id,
            "h1".into(),
            EncounterType::Outpatient,
            "General Medicine".into(),
            "Dr. X".into(),
        );
        let result = workflow.update_encounter(&encounter);
        assert!(matches!(result, Err(WorkflowError::NotFound(_))));
    }

    #[test]
    fn test_update_rejects_backward_status() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        let encounter = workflow
            .create_encounter(
                &patient_id,
                "h1",
                EncounterType::Outpatient,
                "General Medicine",
                "Dr. X",
            )
            .unwrap();
        let mut advanced = workflow
            .advance(&encounter.id, EncounterStatus::Billing)
            .unwrap();

        advanced.status = EncounterStatus::Waiting;
        let result = workflow.update_encounter(&advanced);
        assert!(matches!(
            result,
            Err(WorkflowError::IllegalTransition { .. })
        ));
    }

    #[test]
    fn test_snapshot_queries_are_stable() {
        let (db, patient_id) = setup_db();
        let workflow = EncounterWorkflow::new(&db);

        for _ in 0..3 {
            workflow
                .create_encounter(
                    &patient_id,
                    "h1",
                    EncounterType::Outpatient,
                    "General Medicine",
                    "Dr. X",
                )
                .unwrap();
        }

        let first = workflow.by_hospital("h1").unwrap();
        let second = workflow.by_hospital("h1").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);

        assert_eq!(workflow.not_finished().unwrap().len(), 3);
        assert_eq!(
            workflow.by_status(EncounterStatus::Waiting).unwrap().len(),
            3
        );
    }
}
