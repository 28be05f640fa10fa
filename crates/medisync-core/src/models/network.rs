//! Hospital-network reference data: facilities, doctors, insurers, stock.

use serde::{Deserialize, Serialize};

/// A facility in the hospital network. Read-only reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospital {
    /// Unique hospital ID
    pub id: String,
    /// Facility name
    pub name: String,
    /// Short code (e.g. "MLG")
    pub code: String,
    /// City/region
    pub location: String,
}

/// A doctor practicing at one or more facilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// Unique doctor ID
    pub id: String,
    /// Full name
    pub name: String,
    /// Specialty, used as the booking department
    pub specialty: String,
    /// Facilities where this doctor practices
    pub hospital_ids: Vec<String>,
}

impl Doctor {
    /// Check whether the doctor practices at the given facility.
    pub fn practices_at(&self, hospital_id: &str) -> bool {
        self.hospital_ids.iter().any(|h| h == hospital_id)
    }
}

/// An insurance provider claims can be bridged to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsuranceProvider {
    /// Unique provider ID
    pub id: String,
    /// Provider name
    pub name: String,
    /// Short code
    pub code: String,
}

/// A pharmacy stock item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medicine {
    /// Unique medicine ID
    pub id: String,
    /// Name including strength (e.g. "Paracetamol 500mg")
    pub name: String,
    /// Units on hand
    pub stock: i64,
    /// Dispensing unit (tablet, capsule, vial)
    pub unit: String,
    /// Unit price
    pub price: f64,
}

impl Medicine {
    /// Check whether stock has fallen below the alert threshold.
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.stock < threshold
    }
}
