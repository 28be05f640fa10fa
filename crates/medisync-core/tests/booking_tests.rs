//! Booking ledger integration tests.

use std::sync::Arc;

use medisync_core::models::TIME_SLOTS;
use medisync_core::{
    open_database_in_memory, FfiDoctor, FfiHospital, MedisyncCore, MedisyncError,
};

fn seed_core() -> Arc<MedisyncCore> {
    let core = open_database_in_memory().unwrap();
    core.upsert_hospital(FfiHospital {
        id: "h1".into(),
        name: "RS Medika Malang".into(),
        code: "MLG".into(),
        location: "Malang".into(),
    })
    .unwrap();
    core.upsert_doctor(FfiDoctor {
        id: "d1".into(),
        name: "Dr. Jane".into(),
        specialty: "Pediatrics".into(),
        hospital_ids: vec!["h1".into()],
    })
    .unwrap();
    core
}

#[test]
fn test_booking_flow() {
    let core = seed_core();

    let doctors = core.list_doctors_for_hospital("h1".into()).unwrap();
    assert_eq!(doctors.len(), 1);

    let appointment = core
        .book_appointment(
            "Siti Aminah".into(),
            "h1".into(),
            "d1".into(),
            "2024-06-01".into(),
            "08:00".into(),
        )
        .unwrap();
    assert_eq!(appointment.status, "Confirmed");
    assert_eq!(appointment.department, "Pediatrics");

    let appointments = core.list_appointments().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].patient_name, "Siti Aminah");
}

#[test]
fn test_empty_patient_name_rejected() {
    let core = seed_core();

    let result = core.book_appointment(
        "".into(),
        "h1".into(),
        "d1".into(),
        "2024-01-01".into(),
        "08:00".into(),
    );
    assert!(matches!(result, Err(MedisyncError::ValidationError(_))));
    assert!(core.list_appointments().unwrap().is_empty());
}

#[test]
fn test_available_slots_shrink_as_bookings_land() {
    let core = seed_core();

    let before = core
        .available_slots("h1".into(), "d1".into(), "2024-06-01".into())
        .unwrap();
    assert_eq!(before.len(), TIME_SLOTS.len());

    core.book_appointment(
        "Siti Aminah".into(),
        "h1".into(),
        "d1".into(),
        "2024-06-01".into(),
        "08:00".into(),
    )
    .unwrap();

    let after = core
        .available_slots("h1".into(), "d1".into(), "2024-06-01".into())
        .unwrap();
    assert_eq!(after.len(), TIME_SLOTS.len() - 1);
    assert!(!after.contains(&"08:00".to_string()));
}

#[test]
fn test_cancellation_frees_the_slot() {
    let core = seed_core();

    let appointment = core
        .book_appointment(
            "Siti Aminah".into(),
            "h1".into(),
            "d1".into(),
            "2024-06-01".into(),
            "10:30".into(),
        )
        .unwrap();

    let cancelled = core
        .set_appointment_status(appointment.id, "Cancelled".into())
        .unwrap();
    assert_eq!(cancelled.status, "Cancelled");

    let slots = core
        .available_slots("h1".into(), "d1".into(), "2024-06-01".into())
        .unwrap();
    assert!(slots.contains(&"10:30".to_string()));
}

#[test]
fn test_booking_never_creates_an_encounter() {
    let core = seed_core();

    core.book_appointment(
        "Siti Aminah".into(),
        "h1".into(),
        "d1".into(),
        "2024-06-01".into(),
        "08:00".into(),
    )
    .unwrap();

    assert!(core.encounters_for_hospital("h1".into()).unwrap().is_empty());
}
