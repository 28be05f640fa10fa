//! Patient directory: registration and lookup.

use rand::Rng;
use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::{Gender, Patient};

/// Directory errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Invalid registration: {0}")]
    Validation(String),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Identity fields collected by the registration form.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub dob: String,
    pub gender: Gender,
    pub nik: String,
    pub bpjs: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
}

/// Registration and lookup over the patient collection.
pub struct PatientDirectory<'a> {
    db: &'a Database,
}

impl<'a> PatientDirectory<'a> {
    /// Create a directory over the store.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a new patient.
    ///
    /// Assigns a fresh MRN, regenerated while it collides with an existing
    /// record. Name, date of birth and national id are required.
    pub fn register(&self, input: NewPatient) -> DirectoryResult<Patient> {
        if input.name.trim().is_empty() {
            return Err(DirectoryError::Validation("Patient name is required".into()));
        }
        if input.dob.trim().is_empty() {
            return Err(DirectoryError::Validation(
                "Date of birth is required".into(),
            ));
        }
        if input.nik.trim().is_empty() {
            return Err(DirectoryError::Validation(
                "National id (NIK) is required".into(),
            ));
        }

        let mut mrn = generate_mrn();
        while self.db.mrn_exists(&mrn)? {
            mrn = generate_mrn();
        }

        let mut patient = Patient::new(mrn, input.name, input.dob, input.gender, input.nik);
        patient.bpjs = input.bpjs;
        patient.phone = input.phone;
        patient.email = input.email;
        patient.address = input.address;

        self.db.insert_patient(&patient)?;
        Ok(patient)
    }

    /// Get a patient by ID.
    pub fn get(&self, id: &str) -> DirectoryResult<Option<Patient>> {
        Ok(self.db.get_patient(id)?)
    }

    /// Substring lookup over name, MRN and national id.
    pub fn search(&self, query: &str) -> DirectoryResult<Vec<Patient>> {
        Ok(self.db.search_patients(query)?)
    }

    /// List all registered patients.
    pub fn list(&self) -> DirectoryResult<Vec<Patient>> {
        Ok(self.db.list_patients()?)
    }
}

/// Generate a display MRN (MRN-nnnn).
fn generate_mrn() -> String {
    format!("MRN-{}", rand::thread_rng().gen_range(1000..10000))
}
