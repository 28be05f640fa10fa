//! Patient identity records.

use serde::{Deserialize, Serialize};

/// Patient gender as recorded on the identity document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Single-letter form used for storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }

    /// Parse the stored single-letter form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "M" => Some(Gender::Male),
            "F" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// A registered patient identity record.
///
/// Immutable once registered; the directory never deletes patients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Unique patient ID
    pub id: String,
    /// Medical record number, the durable display identifier (MRN-nnnn)
    pub mrn: String,
    /// Full name
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    /// Gender
    pub gender: Gender,
    /// Home address
    pub address: String,
    /// Phone number
    pub phone: String,
    /// National identity number
    pub nik: String,
    /// Insurance membership number, if enrolled
    pub bpjs: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Registration timestamp
    pub created_at: String,
}

impl Patient {
    /// Create a new patient with required identity fields.
    pub fn new(mrn: String, name: String, dob: String, gender: Gender, nik: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            mrn,
            name,
            dob,
            gender,
            address: String::new(),
            phone: String::new(),
            nik,
            bpjs: None,
            email: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Check whether this patient carries an insurance membership.
    pub fn is_insured(&self) -> bool {
        self.bpjs.is_some()
    }
}
