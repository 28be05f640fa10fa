//! MedisSync Core Library
//!
//! Hospital-network management core: one shared store of clinical and
//! administrative records driven through an explicit visit workflow.
//!
//! # Architecture
//!
//! ```text
//! Registration ──creates──▶ ┌──────────────────────────────┐
//!                           │       Encounter Store        │
//! Clinical ────advances───▶ │  waiting → triaged → doctor  │
//!   (SOAP notes)            │  → pharmacy → billing        │
//!                           │  → finished                  │
//!                           └──────┬──────────────┬────────┘
//!                                  │              │
//!                          billing/finished    full scan
//!                                  │              │
//!                                  ▼              ▼
//!                            Claims Desk      Census / KPIs
//!                                  │
//!                        ┌─────────▼──────────┐
//!                        │   Insurer Bridge   │  Submitted → Processing
//!                        │  (delayed, guarded)│  after a fixed delay
//!                        └────────────────────┘
//!
//! Booking keeps its own ledger; a confirmed appointment never creates an
//! encounter.
//! ```
//!
//! # Core Principle
//!
//! **Every status change is a checked transition.** The workflow order is
//! fixed and records only move forward; backward moves are rejected (or,
//! for claim overwrites, applied but flagged).
//!
//! # Modules
//!
//! - [`db`]: SQLite store (canonically in-memory, session-scoped)
//! - [`models`]: Domain types (Patient, Encounter, Claim, Appointment, etc.)
//! - [`directory`]: Patient registration and lookup
//! - [`workflow`]: Encounter lifecycle and transition rules
//! - [`claims`]: Claims desk and the simulated insurer bridge
//! - [`scheduling`]: Appointment booking ledger
//! - [`census`]: Read-only dashboard projections

pub mod census;
pub mod claims;
pub mod db;
pub mod directory;
pub mod models;
pub mod scheduling;
pub mod workflow;

// Re-export commonly used types
pub use census::{CensusReport, CensusReporter, DepartmentCount, EncounterDigest};
pub use claims::{BridgeConfig, ClaimBridge, ClaimsDesk};
pub use db::Database;
pub use directory::{NewPatient, PatientDirectory};
pub use models::{
    Appointment, AppointmentStatus, BillingStatus, Claim, ClaimStatus, Doctor, Encounter,
    EncounterStatus, EncounterType, Gender, Hospital, InsuranceProvider, Medicine, Patient,
    SoapNote, TIME_SLOTS,
};
pub use scheduling::{BookingDesk, SchedulingConfig};
pub use workflow::EncounterWorkflow;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedisyncError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Illegal transition: {0}")]
    IllegalTransition(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for MedisyncError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(msg) => MedisyncError::NotFoundError(msg),
            db::DbError::Json(e) => MedisyncError::SerializationError(e.to_string()),
            other => MedisyncError::DatabaseError(other.to_string()),
        }
    }
}

impl From<workflow::WorkflowError> for MedisyncError {
    fn from(e: workflow::WorkflowError) -> Self {
        match e {
            workflow::WorkflowError::Validation(msg) => MedisyncError::ValidationError(msg),
            workflow::WorkflowError::NotFound(id) => MedisyncError::NotFoundError(id),
            workflow::WorkflowError::IllegalTransition { from, to } => {
                MedisyncError::IllegalTransition(format!("{} -> {}", from.as_str(), to.as_str()))
            }
            workflow::WorkflowError::Db(e) => e.into(),
        }
    }
}

impl From<claims::ClaimsError> for MedisyncError {
    fn from(e: claims::ClaimsError) -> Self {
        match e {
            claims::ClaimsError::Validation(msg) => MedisyncError::ValidationError(msg),
            claims::ClaimsError::NotFound(id) => MedisyncError::NotFoundError(id),
            claims::ClaimsError::Db(e) => e.into(),
        }
    }
}

impl From<scheduling::BookingError> for MedisyncError {
    fn from(e: scheduling::BookingError) -> Self {
        match e {
            scheduling::BookingError::Validation(msg) => MedisyncError::ValidationError(msg),
            scheduling::BookingError::NotFound(id) => MedisyncError::NotFoundError(id),
            scheduling::BookingError::Db(e) => e.into(),
        }
    }
}

impl From<directory::DirectoryError> for MedisyncError {
    fn from(e: directory::DirectoryError) -> Self {
        match e {
            directory::DirectoryError::Validation(msg) => MedisyncError::ValidationError(msg),
            directory::DirectoryError::Db(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for MedisyncError {
    fn from(e: serde_json::Error) -> Self {
        MedisyncError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedisyncError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedisyncError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_encounter_type(s: &str) -> Result<EncounterType, MedisyncError> {
    EncounterType::parse(s)
        .ok_or_else(|| MedisyncError::ValidationError(format!("Unknown encounter type: {}", s)))
}

fn parse_encounter_status(s: &str) -> Result<EncounterStatus, MedisyncError> {
    EncounterStatus::parse(s)
        .ok_or_else(|| MedisyncError::ValidationError(format!("Unknown encounter status: {}", s)))
}

fn parse_billing_status(s: &str) -> Result<BillingStatus, MedisyncError> {
    BillingStatus::parse(s)
        .ok_or_else(|| MedisyncError::ValidationError(format!("Unknown billing status: {}", s)))
}

fn parse_claim_status(s: &str) -> Result<ClaimStatus, MedisyncError> {
    ClaimStatus::parse(s)
        .ok_or_else(|| MedisyncError::ValidationError(format!("Unknown claim status: {}", s)))
}

fn parse_appointment_status(s: &str) -> Result<AppointmentStatus, MedisyncError> {
    AppointmentStatus::parse(s)
        .ok_or_else(|| MedisyncError::ValidationError(format!("Unknown appointment status: {}", s)))
}

fn parse_gender(s: &str) -> Result<Gender, MedisyncError> {
    Gender::parse(s).ok_or_else(|| MedisyncError::ValidationError(format!("Unknown gender: {}", s)))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a store at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<MedisyncCore>, MedisyncError> {
    let db = Database::open(&path)?;
    Ok(make_core(db))
}

/// Create a session-scoped in-memory store.
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<MedisyncCore>, MedisyncError> {
    let db = Database::open_in_memory()?;
    Ok(make_core(db))
}

fn make_core(db: Database) -> Arc<MedisyncCore> {
    let db = Arc::new(Mutex::new(db));
    let bridge = ClaimBridge::new(Arc::clone(&db), BridgeConfig::default());
    Arc::new(MedisyncCore { db, bridge })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedisyncCore {
    db: Arc<Mutex<Database>>,
    bridge: ClaimBridge,
}

#[uniffi::export]
impl MedisyncCore {
    // =========================================================================
    // Reference Data Operations
    // =========================================================================

    /// Add or update a hospital.
    pub fn upsert_hospital(&self, hospital: FfiHospital) -> Result<(), MedisyncError> {
        let db = self.db.lock()?;
        db.upsert_hospital(&hospital.into())?;
        Ok(())
    }

    /// List all hospitals in the network.
    pub fn list_hospitals(&self) -> Result<Vec<FfiHospital>, MedisyncError> {
        let db = self.db.lock()?;
        let hospitals = db.list_hospitals()?;
        Ok(hospitals.into_iter().map(|h| h.into()).collect())
    }

    /// Add or update a doctor.
    pub fn upsert_doctor(&self, doctor: FfiDoctor) -> Result<(), MedisyncError> {
        let db = self.db.lock()?;
        db.upsert_doctor(&doctor.into())?;
        Ok(())
    }

    /// List doctors practicing at a facility.
    pub fn list_doctors_for_hospital(
        &self,
        hospital_id: String,
    ) -> Result<Vec<FfiDoctor>, MedisyncError> {
        let db = self.db.lock()?;
        let doctors = db.list_doctors_for_hospital(&hospital_id)?;
        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    /// Add or update an insurance provider.
    pub fn upsert_insurer(&self, provider: FfiInsuranceProvider) -> Result<(), MedisyncError> {
        let db = self.db.lock()?;
        db.upsert_insurer(&provider.into())?;
        Ok(())
    }

    /// List all insurance providers.
    pub fn list_insurers(&self) -> Result<Vec<FfiInsuranceProvider>, MedisyncError> {
        let db = self.db.lock()?;
        let providers = db.list_insurers()?;
        Ok(providers.into_iter().map(|p| p.into()).collect())
    }

    /// Add or update a medicine.
    pub fn upsert_medicine(&self, medicine: FfiMedicine) -> Result<(), MedisyncError> {
        let db = self.db.lock()?;
        db.upsert_medicine(&medicine.into())?;
        Ok(())
    }

    /// List medicines below the stock alert threshold.
    pub fn low_stock_medicines(&self) -> Result<Vec<FfiMedicine>, MedisyncError> {
        let db = self.db.lock()?;
        let reporter = CensusReporter::new(&db);
        let medicines = reporter.low_stock_medicines()?;
        Ok(medicines.into_iter().map(|m| m.into()).collect())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient.
    pub fn register_patient(&self, input: FfiNewPatient) -> Result<FfiPatient, MedisyncError> {
        let db = self.db.lock()?;
        let directory = PatientDirectory::new(&db);
        let patient = directory.register(input.try_into()?)?;
        Ok(patient.into())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, MedisyncError> {
        let db = self.db.lock()?;
        let directory = PatientDirectory::new(&db);
        Ok(directory.get(&id)?.map(|p| p.into()))
    }

    /// Substring lookup over name, MRN and national id.
    pub fn search_patients(&self, query: String) -> Result<Vec<FfiPatient>, MedisyncError> {
        let db = self.db.lock()?;
        let directory = PatientDirectory::new(&db);
        let patients = directory.search(&query)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Encounter Operations
    // =========================================================================

    /// Admit a new encounter for a registered patient.
    pub fn create_encounter(
        &self,
        patient_id: String,
        hospital_id: String,
        encounter_type: String,
        department: String,
        doctor: String,
    ) -> Result<FfiEncounter, MedisyncError> {
        let encounter_type = parse_encounter_type(&encounter_type)?;
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        let encounter = workflow.create_encounter(
            &patient_id,
            &hospital_id,
            encounter_type,
            &department,
            &doctor,
        )?;
        Ok(encounter.into())
    }

    /// Get an encounter by ID.
    pub fn get_encounter(&self, id: String) -> Result<Option<FfiEncounter>, MedisyncError> {
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        Ok(workflow.get(&id)?.map(|e| e.into()))
    }

    /// Replace a stored encounter wholesale.
    pub fn update_encounter(&self, encounter: FfiEncounter) -> Result<FfiEncounter, MedisyncError> {
        let encounter: Encounter = encounter.try_into()?;
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        let updated = workflow.update_encounter(&encounter)?;
        Ok(updated.into())
    }

    /// Advance an encounter to a later workflow stage.
    pub fn advance_encounter(
        &self,
        id: String,
        status: String,
    ) -> Result<FfiEncounter, MedisyncError> {
        let status = parse_encounter_status(&status)?;
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        let encounter = workflow.advance(&id, status)?;
        Ok(encounter.into())
    }

    /// Finalize a consultation: attach the SOAP note and move to pharmacy.
    pub fn finalize_consultation(
        &self,
        id: String,
        soap: FfiSoapNote,
    ) -> Result<FfiEncounter, MedisyncError> {
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        let encounter = workflow.advance_to_pharmacy(&id, soap.into())?;
        Ok(encounter.into())
    }

    /// Snapshot of the encounters at one facility.
    pub fn encounters_for_hospital(
        &self,
        hospital_id: String,
    ) -> Result<Vec<FfiEncounter>, MedisyncError> {
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        let encounters = workflow.by_hospital(&hospital_id)?;
        Ok(encounters.into_iter().map(|e| e.into()).collect())
    }

    /// Snapshot of the encounters in one workflow stage.
    pub fn encounters_with_status(
        &self,
        status: String,
    ) -> Result<Vec<FfiEncounter>, MedisyncError> {
        let status = parse_encounter_status(&status)?;
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        let encounters = workflow.by_status(status)?;
        Ok(encounters.into_iter().map(|e| e.into()).collect())
    }

    /// Snapshot of the encounters whose visit is still open.
    pub fn open_encounters(&self) -> Result<Vec<FfiEncounter>, MedisyncError> {
        let db = self.db.lock()?;
        let workflow = EncounterWorkflow::new(&db);
        let encounters = workflow.not_finished()?;
        Ok(encounters.into_iter().map(|e| e.into()).collect())
    }

    // =========================================================================
    // Claims Operations
    // =========================================================================

    /// Encounters ready for claim submission.
    pub fn claimable_encounters(&self) -> Result<Vec<FfiEncounter>, MedisyncError> {
        let db = self.db.lock()?;
        let desk = ClaimsDesk::new(&db);
        let encounters = desk.eligible_for_claim()?;
        Ok(encounters.into_iter().map(|e| e.into()).collect())
    }

    /// Submit a claim and schedule the simulated insurer response.
    pub fn submit_claim(
        &self,
        encounter_id: String,
        provider_id: String,
    ) -> Result<FfiClaim, MedisyncError> {
        let claim = {
            let db = self.db.lock()?;
            let desk = ClaimsDesk::new(&db);
            desk.submit(&encounter_id, &provider_id)?
        };
        // Scheduled outside the store lock; the timer re-checks state on fire
        self.bridge.schedule_processing(&claim.id);
        Ok(claim.into())
    }

    /// Overwrite a claim's status (out-of-order moves are flagged).
    pub fn set_claim_status(
        &self,
        claim_id: String,
        status: String,
    ) -> Result<FfiClaim, MedisyncError> {
        let status = parse_claim_status(&status)?;
        let db = self.db.lock()?;
        let desk = ClaimsDesk::new(&db);
        let claim = desk.update_status(&claim_id, status)?;
        Ok(claim.into())
    }

    /// List all claims.
    pub fn list_claims(&self) -> Result<Vec<FfiClaim>, MedisyncError> {
        let db = self.db.lock()?;
        let desk = ClaimsDesk::new(&db);
        let claims = desk.list()?;
        Ok(claims.into_iter().map(|c| c.into()).collect())
    }

    /// Remove a claim, cancelling its pending bridge timer.
    pub fn remove_claim(&self, claim_id: String) -> Result<bool, MedisyncError> {
        self.bridge.cancel(&claim_id);
        let db = self.db.lock()?;
        Ok(db.delete_claim(&claim_id)?)
    }

    // =========================================================================
    // Booking Operations
    // =========================================================================

    /// Slots open for a doctor at a facility on a date.
    pub fn available_slots(
        &self,
        hospital_id: String,
        doctor_id: String,
        date: String,
    ) -> Result<Vec<String>, MedisyncError> {
        let db = self.db.lock()?;
        let desk = BookingDesk::new(&db);
        Ok(desk.available_slots(&hospital_id, &doctor_id, &date)?)
    }

    /// Book an appointment.
    pub fn book_appointment(
        &self,
        patient_name: String,
        hospital_id: String,
        doctor_id: String,
        date: String,
        time_slot: String,
    ) -> Result<FfiAppointment, MedisyncError> {
        let db = self.db.lock()?;
        let desk = BookingDesk::new(&db);
        let appointment = desk.book(&patient_name, &hospital_id, &doctor_id, &date, &time_slot)?;
        Ok(appointment.into())
    }

    /// List all appointments.
    pub fn list_appointments(&self) -> Result<Vec<FfiAppointment>, MedisyncError> {
        let db = self.db.lock()?;
        let desk = BookingDesk::new(&db);
        let appointments = desk.list()?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    /// Mark an appointment cancelled or arrived.
    pub fn set_appointment_status(
        &self,
        id: String,
        status: String,
    ) -> Result<FfiAppointment, MedisyncError> {
        let status = parse_appointment_status(&status)?;
        let db = self.db.lock()?;
        let desk = BookingDesk::new(&db);
        let appointment = desk.update_status(&id, status)?;
        Ok(appointment.into())
    }

    // =========================================================================
    // Census Operations
    // =========================================================================

    /// Take the KPI snapshot for a facility.
    pub fn census_report(&self, hospital_id: String) -> Result<FfiCensusReport, MedisyncError> {
        let db = self.db.lock()?;
        let reporter = CensusReporter::new(&db);
        let report = reporter.report(&hospital_id)?;
        Ok(report.into())
    }

    /// Per-department encounter counts for a facility.
    pub fn department_mix(
        &self,
        hospital_id: String,
    ) -> Result<Vec<FfiDepartmentCount>, MedisyncError> {
        let db = self.db.lock()?;
        let reporter = CensusReporter::new(&db);
        let mix = reporter.department_mix(&hospital_id)?;
        Ok(mix.into_iter().map(|d| d.into()).collect())
    }

    /// The (department, status) digest handed to the insight summarizer.
    pub fn encounter_digest(
        &self,
        hospital_id: String,
    ) -> Result<Vec<FfiEncounterDigest>, MedisyncError> {
        let db = self.db.lock()?;
        let reporter = CensusReporter::new(&db);
        let digest = reporter.encounter_digest(&hospital_id)?;
        Ok(digest.into_iter().map(|d| d.into()).collect())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe hospital.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHospital {
    pub id: String,
    pub name: String,
    pub code: String,
    pub location: String,
}

impl From<Hospital> for FfiHospital {
    fn from(h: Hospital) -> Self {
        Self {
            id: h.id,
            name: h.name,
            code: h.code,
            location: h.location,
        }
    }
}

impl From<FfiHospital> for Hospital {
    fn from(h: FfiHospital) -> Self {
        Hospital {
            id: h.id,
            name: h.name,
            code: h.code,
            location: h.location,
        }
    }
}

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub hospital_ids: Vec<String>,
}

impl From<Doctor> for FfiDoctor {
    fn from(d: Doctor) -> Self {
        Self {
            id: d.id,
            name: d.name,
            specialty: d.specialty,
            hospital_ids: d.hospital_ids,
        }
    }
}

impl From<FfiDoctor> for Doctor {
    fn from(d: FfiDoctor) -> Self {
        Doctor {
            id: d.id,
            name: d.name,
            specialty: d.specialty,
            hospital_ids: d.hospital_ids,
        }
    }
}

/// FFI-safe insurance provider.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInsuranceProvider {
    pub id: String,
    pub name: String,
    pub code: String,
}

impl From<InsuranceProvider> for FfiInsuranceProvider {
    fn from(p: InsuranceProvider) -> Self {
        Self {
            id: p.id,
            name: p.name,
            code: p.code,
        }
    }
}

impl From<FfiInsuranceProvider> for InsuranceProvider {
    fn from(p: FfiInsuranceProvider) -> Self {
        InsuranceProvider {
            id: p.id,
            name: p.name,
            code: p.code,
        }
    }
}

/// FFI-safe medicine.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicine {
    pub id: String,
    pub name: String,
    pub stock: i64,
    pub unit: String,
    pub price: f64,
}

impl From<Medicine> for FfiMedicine {
    fn from(m: Medicine) -> Self {
        Self {
            id: m.id,
            name: m.name,
            stock: m.stock,
            unit: m.unit,
            price: m.price,
        }
    }
}

impl From<FfiMedicine> for Medicine {
    fn from(m: FfiMedicine) -> Self {
        Medicine {
            id: m.id,
            name: m.name,
            stock: m.stock,
            unit: m.unit,
            price: m.price,
        }
    }
}

/// FFI-safe registration form input.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub nik: String,
    pub bpjs: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
}

impl TryFrom<FfiNewPatient> for NewPatient {
    type Error = MedisyncError;

    fn try_from(input: FfiNewPatient) -> Result<Self, Self::Error> {
        Ok(NewPatient {
            name: input.name,
            dob: input.dob,
            gender: parse_gender(&input.gender)?,
            nik: input.nik,
            bpjs: input.bpjs,
            phone: input.phone,
            email: input.email,
            address: input.address,
        })
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub mrn: String,
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub address: String,
    pub phone: String,
    pub nik: String,
    pub bpjs: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(p: Patient) -> Self {
        Self {
            id: p.id,
            mrn: p.mrn,
            name: p.name,
            dob: p.dob,
            gender: p.gender.as_str().to_string(),
            address: p.address,
            phone: p.phone,
            nik: p.nik,
            bpjs: p.bpjs,
            email: p.email,
            created_at: p.created_at,
        }
    }
}

/// FFI-safe SOAP note.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSoapNote {
    pub subjective: String,
    pub objective: String,
    pub assessment: String,
    pub plan: String,
}

impl From<SoapNote> for FfiSoapNote {
    fn from(s: SoapNote) -> Self {
        Self {
            subjective: s.subjective,
            objective: s.objective,
            assessment: s.assessment,
            plan: s.plan,
        }
    }
}

impl From<FfiSoapNote> for SoapNote {
    fn from(s: FfiSoapNote) -> Self {
        SoapNote {
            subjective: s.subjective,
            objective: s.objective,
            assessment: s.assessment,
            plan: s.plan,
        }
    }
}

/// FFI-safe encounter. Statuses cross the boundary as strings.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEncounter {
    pub id: String,
    pub patient_id: String,
    pub hospital_id: String,
    pub encounter_type: String,
    pub department: String,
    pub doctor: String,
    pub status: String,
    pub created_at: String,
    pub soap: Option<FfiSoapNote>,
    pub billing_status: String,
    pub total_charge: Option<f64>,
}

impl From<Encounter> for FfiEncounter {
    fn from(e: Encounter) -> Self {
        Self {
            id: e.id,
            patient_id: e.patient_id,
            hospital_id: e.hospital_id,
            encounter_type: e.encounter_type.as_str().to_string(),
            department: e.department,
            doctor: e.doctor,
            status: e.status.as_str().to_string(),
            created_at: e.created_at,
            soap: e.soap.map(|s| s.into()),
            billing_status: e.billing_status.as_str().to_string(),
            total_charge: e.total_charge,
        }
    }
}

impl TryFrom<FfiEncounter> for Encounter {
    type Error = MedisyncError;

    fn try_from(e: FfiEncounter) -> Result<Self, Self::Error> {
        Ok(Encounter {
            encounter_type: parse_encounter_type(&e.encounter_type)?,
            status: parse_encounter_status(&e.status)?,
            billing_status: parse_billing_status(&e.billing_status)?,
            id: e.id,
            patient_id: e.patient_id,
            hospital_id: e.hospital_id,
            department: e.department,
            doctor: e.doctor,
            created_at: e.created_at,
            soap: e.soap.map(|s| s.into()),
            total_charge: e.total_charge,
        })
    }
}

/// FFI-safe claim.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClaim {
    pub id: String,
    pub encounter_id: String,
    pub provider_id: String,
    pub status: String,
    pub amount: f64,
    pub submitted_at: String,
    pub notes: Option<String>,
}

impl From<Claim> for FfiClaim {
    fn from(c: Claim) -> Self {
        Self {
            id: c.id,
            encounter_id: c.encounter_id,
            provider_id: c.provider_id,
            status: c.status.as_str().to_string(),
            amount: c.amount,
            submitted_at: c.submitted_at,
            notes: c.notes,
        }
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: String,
    pub patient_name: String,
    pub hospital_id: String,
    pub department: String,
    pub doctor: String,
    pub date: String,
    pub time_slot: String,
    pub status: String,
}

impl From<Appointment> for FfiAppointment {
    fn from(a: Appointment) -> Self {
        Self {
            id: a.id,
            patient_name: a.patient_name,
            hospital_id: a.hospital_id,
            department: a.department,
            doctor: a.doctor,
            date: a.date,
            time_slot: a.time_slot,
            status: a.status.as_str().to_string(),
        }
    }
}

/// FFI-safe census report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCensusReport {
    pub hospital_id: String,
    pub total_encounters: u32,
    pub outpatient: u32,
    pub er: u32,
    pub inpatient: u32,
    pub waiting: u32,
    pub triaged: u32,
    pub in_consultation: u32,
    pub pharmacy_queue: u32,
    pub billing_queue: u32,
    pub finished: u32,
    pub unpaid: u32,
    pub collected_revenue: f64,
}

impl From<CensusReport> for FfiCensusReport {
    fn from(r: CensusReport) -> Self {
        Self {
            hospital_id: r.hospital_id,
            total_encounters: r.total_encounters,
            outpatient: r.outpatient,
            er: r.er,
            inpatient: r.inpatient,
            waiting: r.waiting,
            triaged: r.triaged,
            in_consultation: r.in_consultation,
            pharmacy_queue: r.pharmacy_queue,
            billing_queue: r.billing_queue,
            finished: r.finished,
            unpaid: r.unpaid,
            collected_revenue: r.collected_revenue,
        }
    }
}

/// FFI-safe department count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDepartmentCount {
    pub department: String,
    pub count: u32,
}

impl From<DepartmentCount> for FfiDepartmentCount {
    fn from(d: DepartmentCount) -> Self {
        Self {
            department: d.department,
            count: d.count,
        }
    }
}

/// FFI-safe encounter digest entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEncounterDigest {
    pub department: String,
    pub status: String,
}

impl From<EncounterDigest> for FfiEncounterDigest {
    fn from(d: EncounterDigest) -> Self {
        Self {
            department: d.department,
            status: d.status,
        }
    }
}
