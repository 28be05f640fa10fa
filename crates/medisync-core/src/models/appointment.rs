//! Appointment bookings.
//!
//! The booking ledger is deliberately independent of the encounter store:
//! `patient_name` is free text, not a patient reference, and a confirmed
//! appointment never creates an encounter.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed slot catalog offered by every facility.
pub const TIME_SLOTS: [&str; 14] = [
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "13:00", "13:30",
    "14:00", "14:30", "15:00", "15:30",
];

/// Booking state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
    Arrived,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Arrived => "Arrived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Confirmed" => Some(AppointmentStatus::Confirmed),
            "Cancelled" => Some(AppointmentStatus::Cancelled),
            "Arrived" => Some(AppointmentStatus::Arrived),
            _ => None,
        }
    }
}

/// A booked visit slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Display identifier (APP-XXXXXX)
    pub id: String,
    /// Patient name as entered at booking time
    pub patient_name: String,
    /// Facility being visited
    pub hospital_id: String,
    /// Department (taken from the doctor's specialty)
    pub department: String,
    /// Doctor name
    pub doctor: String,
    /// Visit date (YYYY-MM-DD)
    pub date: String,
    /// Slot from [`TIME_SLOTS`]
    pub time_slot: String,
    /// Booking state
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Create a confirmed appointment.
    pub fn new(
        patient_name: String,
        hospital_id: String,
        department: String,
        doctor: String,
        date: String,
        time_slot: String,
    ) -> Self {
        Self {
            id: generate_appointment_id(),
            patient_name,
            hospital_id,
            department,
            doctor,
            date,
            time_slot,
            status: AppointmentStatus::Confirmed,
        }
    }

    /// True when the booking still occupies its slot.
    pub fn holds_slot(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

/// Generate a display appointment identifier (APP-XXXXXX).
///
/// Uniqueness is enforced by the caller against the store.
pub fn generate_appointment_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("APP-{}", suffix)
}
