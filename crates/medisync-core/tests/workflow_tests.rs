//! Encounter workflow integration tests.
//!
//! Drives the full patient journey through the FFI surface, plus property
//! checks on id uniqueness and transition monotonicity.

use std::collections::HashSet;

use proptest::prelude::*;

use medisync_core::db::Database;
use medisync_core::models::{
    Encounter, EncounterStatus, EncounterType, Gender, Hospital, Patient,
};
use medisync_core::workflow::{EncounterWorkflow, WorkflowError};
use medisync_core::{open_database_in_memory, FfiHospital, FfiNewPatient, FfiSoapNote};

fn seed_core() -> std::sync::Arc<medisync_core::MedisyncCore> {
    let core = open_database_in_memory().unwrap();
    core.upsert_hospital(FfiHospital {
        id: "h1".into(),
        name: "RS Medika Malang".into(),
        code: "MLG".into(),
        location: "Malang".into(),
    })
    .unwrap();
    core
}

fn register_patient(core: &medisync_core::MedisyncCore) -> String {
    core.register_patient(FfiNewPatient {
        name: "Budi Santoso".into(),
        dob: "1985-05-12".into(),
        gender: "M".into(),
        nik: "3507121205850001".into(),
        bpjs: None,
        phone: "08123456789".into(),
        email: None,
        address: "Jl. Ijen No. 10".into(),
    })
    .unwrap()
    .id
}

#[test]
fn test_full_patient_journey() {
    let core = seed_core();
    let patient_id = register_patient(&core);

    // Registration admits the visit at waiting/unpaid
    let encounter = core
        .create_encounter(
            patient_id.clone(),
            "h1".into(),
            "Outpatient".into(),
            "General Medicine".into(),
            "Dr. X".into(),
        )
        .unwrap();
    assert_eq!(encounter.status, "waiting");
    assert_eq!(encounter.billing_status, "unpaid");

    // Clinical finalizes the consultation with a SOAP note
    let finalized = core
        .finalize_consultation(
            encounter.id.clone(),
            FfiSoapNote {
                subjective: "fever".into(),
                objective: String::new(),
                assessment: String::new(),
                plan: String::new(),
            },
        )
        .unwrap();
    assert_eq!(finalized.status, "pharmacy");
    assert_eq!(finalized.soap.as_ref().unwrap().subjective, "fever");

    // The cashier attaches the charge through a whole-record replace
    let mut at_billing = core
        .advance_encounter(encounter.id.clone(), "billing".into())
        .unwrap();
    at_billing.total_charge = Some(250_000.0);
    at_billing.billing_status = "paid".into();
    core.update_encounter(at_billing).unwrap();

    let closed = core
        .advance_encounter(encounter.id.clone(), "finished".into())
        .unwrap();
    assert_eq!(closed.status, "finished");

    // The dashboard sees the same store
    let report = core.census_report("h1".into()).unwrap();
    assert_eq!(report.total_encounters, 1);
    assert_eq!(report.finished, 1);
    assert_eq!(report.collected_revenue, 250_000.0);
}

#[test]
fn test_created_ids_are_distinct() {
    let core = seed_core();
    let patient_id = register_patient(&core);

    let mut ids = HashSet::new();
    for _ in 0..25 {
        let encounter = core
            .create_encounter(
                patient_id.clone(),
                "h1".into(),
                "Outpatient".into(),
                "General Medicine".into(),
                "Dr. X".into(),
            )
            .unwrap();
        assert!(ids.insert(encounter.id), "duplicate encounter id");
    }
}

#[test]
fn test_unknown_references_rejected_at_the_boundary() {
    let core = seed_core();
    let patient_id = register_patient(&core);

    let result = core.create_encounter(
        "ghost".into(),
        "h1".into(),
        "Outpatient".into(),
        "General Medicine".into(),
        "Dr. X".into(),
    );
    assert!(matches!(
        result,
        Err(medisync_core::MedisyncError::ValidationError(_))
    ));

    let result = core.create_encounter(
        patient_id.clone(),
        "h9".into(),
        "Outpatient".into(),
        "General Medicine".into(),
        "Dr. X".into(),
    );
    assert!(matches!(
        result,
        Err(medisync_core::MedisyncError::ValidationError(_))
    ));

    let result = core.create_encounter(
        patient_id,
        "h1".into(),
        "Daycare".into(),
        "General Medicine".into(),
        "Dr. X".into(),
    );
    assert!(matches!(
        result,
        Err(medisync_core::MedisyncError::ValidationError(_))
    ));
}

#[test]
fn test_snapshot_queries_idempotent_without_mutation() {
    let core = seed_core();
    let patient_id = register_patient(&core);

    for _ in 0..3 {
        core.create_encounter(
            patient_id.clone(),
            "h1".into(),
            "ER".into(),
            "Emergency".into(),
            "Dr. Smith".into(),
        )
        .unwrap();
    }

    let first = core.encounters_for_hospital("h1".into()).unwrap();
    let second = core.encounters_for_hospital("h1".into()).unwrap();
    assert_eq!(first.len(), 3);
    let first_ids: Vec<_> = first.iter().map(|e| e.id.clone()).collect();
    let second_ids: Vec<_> = second.iter().map(|e| e.id.clone()).collect();
    assert_eq!(first_ids, second_ids);
}

fn seed_db() -> (Database, String) {
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

proptest! {
    // Advancing a record succeeds exactly when the target stage lies
    // strictly ahead of the current one.
    #[test]
    fn advance_is_forward_only(from_idx in 0usize..6, to_idx in 0usize..6) {
        let from = EncounterStatus::ALL[from_idx];
        let to = EncounterStatus::ALL[to_idx];

        let (db, patient_id) = seed_db();
        let mut encounter = Encounter::new(
            patient_id,
            "h1".into(),
            EncounterType::Outpatient,
            "General Medicine".into(),
            "Dr. X".into(),
        );
        encounter.status = from;
        db.insert_encounter(&encounter).unwrap();

        let workflow = EncounterWorkflow::new(&db);
        let result = workflow.advance(&encounter.id, to);

        if to_idx > from_idx {
            let advanced = result.unwrap();
            prop_assert_eq!(advanced.status, to);
        } else {
            let is_illegal =
                matches!(result, Err(WorkflowError::IllegalTransition { .. }));
            prop_assert!(is_illegal);
            // The store is untouched by the rejected move
            let stored = db.get_encounter(&encounter.id).unwrap().unwrap();
            prop_assert_eq!(stored.status, from);
        }
    }
}
