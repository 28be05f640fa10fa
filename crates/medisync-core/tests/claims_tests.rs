//! Claims lifecycle integration tests.
//!
//! Exercises submission, the simulated insurer bridge (including its stale
//! guards) and the permissive-but-flagged status overwrite, all through the
//! FFI surface with the default 3-second bridge delay.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use medisync_core::{
    open_database_in_memory, FfiHospital, FfiInsuranceProvider, FfiNewPatient, MedisyncCore,
    MedisyncError,
};

/// Margin past the default bridge delay.
const BRIDGE_WAIT: Duration = Duration::from_millis(3_500);

fn seed_core() -> Arc<MedisyncCore> {
    let core = open_database_in_memory().unwrap();
    core.upsert_hospital(FfiHospital {
        id: "h1".into(),
        name: "RS Medika Malang".into(),
        code: "MLG".into(),
        location: "Malang".into(),
    })
    .unwrap();
    core.upsert_insurer(FfiInsuranceProvider {
        id: "ins1".into(),
        name: "BPJS Kesehatan".into(),
        code: "BPJS".into(),
    })
    .unwrap();
    core
}

/// Register a patient and drive one encounter to billing with a charge.
fn billable_encounter(core: &MedisyncCore, charge: f64) -> String {
    let patient = core
        .register_patient(FfiNewPatient {
            name: "Budi Santoso".into(),
            dob: "1985-05-12".into(),
            gender: "M".into(),
            nik: "3507121205850001".into(),
            bpjs: Some("0001234567890".into()),
            phone: "08123456789".into(),
            email: None,
            address: "Jl. Ijen No. 10".into(),
        })
        .unwrap();

    let encounter = core
        .create_encounter(
            patient.id,
            "h1".into(),
            "Outpatient".into(),
            "General Medicine".into(),
            "Dr. X".into(),
        )
        .unwrap();

    let mut at_billing = core
        .advance_encounter(encounter.id.clone(), "billing".into())
        .unwrap();
    at_billing.total_charge = Some(charge);
    core.update_encounter(at_billing).unwrap();

    encounter.id
}

#[test]
fn test_submit_then_bridge_advances_to_processing() {
    let core = seed_core();
    let encounter_id = billable_encounter(&core, 320_000.0);

    let claim = core.submit_claim(encounter_id, "ins1".into()).unwrap();
    assert_eq!(claim.status, "Submitted");
    assert_eq!(claim.amount, 320_000.0);

    thread::sleep(BRIDGE_WAIT);

    let claims = core.list_claims().unwrap();
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].status, "Processing");
}

#[test]
fn test_removed_claim_is_not_resurrected_by_the_bridge() {
    let core = seed_core();
    let encounter_id = billable_encounter(&core, 100_000.0);

    let claim = core.submit_claim(encounter_id, "ins1".into()).unwrap();
    assert!(core.remove_claim(claim.id.clone()).unwrap());
    assert!(core.list_claims().unwrap().is_empty());

    thread::sleep(BRIDGE_WAIT);
    assert!(core.list_claims().unwrap().is_empty());
}

#[test]
fn test_manual_adjudication_outruns_the_bridge() {
    let core = seed_core();
    let encounter_id = billable_encounter(&core, 100_000.0);

    let claim = core.submit_claim(encounter_id, "ins1".into()).unwrap();
    core.set_claim_status(claim.id.clone(), "Approved".into())
        .unwrap();

    thread::sleep(BRIDGE_WAIT);

    let claims = core.list_claims().unwrap();
    assert_eq!(claims[0].status, "Approved");
}

#[test]
fn test_submit_rejects_open_encounter() {
    let core = seed_core();
    let patient = core
        .register_patient(FfiNewPatient {
            name: "Siti Aminah".into(),
            dob: "1992-08-21".into(),
            gender: "F".into(),
            nik: "3507126108920002".into(),
            bpjs: None,
            phone: "08198765432".into(),
            email: None,
            address: "Jl. Dieng No. 5".into(),
        })
        .unwrap();
    let encounter = core
        .create_encounter(
            patient.id,
            "h1".into(),
            "ER".into(),
            "Emergency".into(),
            "Dr. Smith".into(),
        )
        .unwrap();

    let result = core.submit_claim(encounter.id, "ins1".into());
    assert!(matches!(result, Err(MedisyncError::ValidationError(_))));
    assert!(core.list_claims().unwrap().is_empty());
}

#[test]
fn test_submit_rejects_unknown_encounter() {
    let core = seed_core();

    let result = core.submit_claim("ghost".into(), "ins1".into());
    assert!(matches!(result, Err(MedisyncError::ValidationError(_))));
    assert!(core.list_claims().unwrap().is_empty());
}

#[test]
fn test_claimable_encounters_exclude_open_stages() {
    let core = seed_core();
    billable_encounter(&core, 50_000.0);

    let patient = core
        .register_patient(FfiNewPatient {
            name: "Andi Wijaya".into(),
            dob: "1970-12-01".into(),
            gender: "M".into(),
            nik: "3507120112700003".into(),
            bpjs: None,
            phone: "08155443322".into(),
            email: None,
            address: "Jl. Borobudur No. 2".into(),
        })
        .unwrap();
    core.create_encounter(
        patient.id,
        "h1".into(),
        "Outpatient".into(),
        "Pediatrics".into(),
        "Dr. Jane".into(),
    )
    .unwrap();

    let claimable = core.claimable_encounters().unwrap();
    assert_eq!(claimable.len(), 1);
    assert_eq!(claimable[0].status, "billing");
}

#[test]
fn test_out_of_order_overwrite_is_applied() {
    let core = seed_core();
    let encounter_id = billable_encounter(&core, 75_000.0);

    let claim = core.submit_claim(encounter_id, "ins1".into()).unwrap();
    core.set_claim_status(claim.id.clone(), "Approved".into())
        .unwrap();
    // Out of order, applied anyway (and flagged in the log)
    let rewound = core
        .set_claim_status(claim.id.clone(), "Draft".into())
        .unwrap();
    assert_eq!(rewound.status, "Draft");

    let result = core.set_claim_status("CLM-GHOST".into(), "Draft".into());
    assert!(matches!(result, Err(MedisyncError::NotFoundError(_))));
}
