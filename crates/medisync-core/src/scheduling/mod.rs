//! Appointment booking over the independent scheduling ledger.
//!
//! Bookings are append-only and deliberately decoupled from the encounter
//! store: a confirmed appointment never creates an encounter, and the
//! patient name is free text rather than a directory reference.

use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{Appointment, AppointmentStatus, TIME_SLOTS};

/// Booking errors.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Invalid booking: {0}")]
    Validation(String),

    #[error("Appointment not found: {0}")]
    NotFound(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Booking behavior switches.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    /// When true, `available_slots` lists the full slot catalog without
    /// subtracting existing bookings. This reproduces the legacy behavior
    /// of the original front desk; the default subtracts booked slots.
    pub list_booked_slots: bool,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            list_booked_slots: false,
        }
    }
}

/// Front desk for the appointment ledger.
pub struct BookingDesk<'a> {
    db: &'a Database,
    config: SchedulingConfig,
}

impl<'a> BookingDesk<'a> {
    /// Create a booking desk with the default (conflict-checking) config.
    pub fn new(db: &'a Database) -> Self {
        Self::with_config(db, SchedulingConfig::default())
    }

    /// Create a booking desk with explicit behavior switches.
    pub fn with_config(db: &'a Database, config: SchedulingConfig) -> Self {
        Self { db, config }
    }

    /// Slots open for a doctor at a facility on a date.
    pub fn available_slots(
        &self,
        hospital_id: &str,
        doctor_id: &str,
        date: &str,
    ) -> BookingResult<Vec<String>> {
        if self.config.list_booked_slots {
            return Ok(TIME_SLOTS.iter().map(|s| s.to_string()).collect());
        }

        let doctor_name = match self.db.get_doctor(doctor_id)? {
            Some(doctor) => doctor.name,
            // Unknown doctor holds no bookings
            None => return Ok(TIME_SLOTS.iter().map(|s| s.to_string()).collect()),
        };

        let booked = self.db.booked_slots(hospital_id, &doctor_name, date)?;
        Ok(TIME_SLOTS
            .iter()
            .filter(|slot| !booked.iter().any(|b| b == *slot))
            .map(|s| s.to_string())
            .collect())
    }

    /// Book an appointment.
    ///
    /// Every selection must be filled in, the slot must come from the fixed
    /// catalog, the hospital must exist, and the doctor must practice there.
    /// Duplicate patient+slot bookings are not cross-checked.
    pub fn book(
        &self,
        patient_name: &str,
        hospital_id: &str,
        doctor_id: &str,
        date: &str,
        time_slot: &str,
    ) -> BookingResult<Appointment> {
        if patient_name.trim().is_empty() {
            return Err(BookingError::Validation("Patient name is required".into()));
        }
        if hospital_id.trim().is_empty() {
            return Err(BookingError::Validation("Hospital is required".into()));
        }
        if doctor_id.trim().is_empty() {
            return Err(BookingError::Validation("Doctor is required".into()));
        }
        if date.trim().is_empty() {
            return Err(BookingError::Validation("Date is required".into()));
        }
        if !TIME_SLOTS.contains(&time_slot) {
            return Err(BookingError::Validation(format!(
                "Unknown time slot: {}",
                time_slot
            )));
        }
        if self.db.get_hospital(hospital_id)?.is_none() {
            return Err(BookingError::Validation(format!(
                "Unknown hospital: {}",
                hospital_id
            )));
        }
        let doctor = self.db.get_doctor(doctor_id)?.ok_or_else(|| {
            BookingError::Validation(format!("Unknown doctor: {}", doctor_id))
        })?;
        if !doctor.practices_at(hospital_id) {
            return Err(BookingError::Validation(format!(
                "{} does not practice at {}",
                doctor.name, hospital_id
            )));
        }

        let mut appointment = Appointment::new(
            patient_name.to_string(),
            hospital_id.to_string(),
            doctor.specialty.clone(),
            doctor.name.clone(),
            date.to_string(),
            time_slot.to_string(),
        );
        while self.db.get_appointment(&appointment.id)?.is_some() {
            appointment.id = crate::models::generate_appointment_id();
        }

        self.db.insert_appointment(&appointment)?;
        Ok(appointment)
    }

    /// List all appointments.
    pub fn list(&self) -> BookingResult<Vec<Appointment>> {
        Ok(self.db.list_appointments()?)
    }

    /// Mark an appointment cancelled or arrived.
    pub fn update_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> BookingResult<Appointment> {
        if !self.db.update_appointment_status(id, status)? {
            return Err(BookingError::NotFound(id.to_string()));
        }
        self.db
            .get_appointment(id)?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }
}
