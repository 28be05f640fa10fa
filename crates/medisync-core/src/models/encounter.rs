//! Encounter records and the visit workflow status order.

use serde::{Deserialize, Serialize};

/// Kind of visit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EncounterType {
    Outpatient,
    Er,
    Inpatient,
}

impl EncounterType {
    /// Display/storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterType::Outpatient => "Outpatient",
            EncounterType::Er => "ER",
            EncounterType::Inpatient => "Inpatient",
        }
    }

    /// Parse the stored form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Outpatient" => Some(EncounterType::Outpatient),
            "ER" => Some(EncounterType::Er),
            "Inpatient" => Some(EncounterType::Inpatient),
            _ => None,
        }
    }
}

/// Visit workflow stage, ordered from admission to discharge.
///
/// Derived `Ord` follows declaration order; the workflow only ever moves
/// a record to a strictly greater stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum EncounterStatus {
    /// Registered, waiting for triage
    Waiting,
    /// Triaged, waiting for the doctor
    Triaged,
    /// In consultation
    Doctor,
    /// Prescription sent to pharmacy
    Pharmacy,
    /// At the cashier
    Billing,
    /// Visit closed
    Finished,
}

impl EncounterStatus {
    /// All stages in workflow order.
    pub const ALL: [EncounterStatus; 6] = [
        EncounterStatus::Waiting,
        EncounterStatus::Triaged,
        EncounterStatus::Doctor,
        EncounterStatus::Pharmacy,
        EncounterStatus::Billing,
        EncounterStatus::Finished,
    ];

    /// Storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncounterStatus::Waiting => "waiting",
            EncounterStatus::Triaged => "triaged",
            EncounterStatus::Doctor => "doctor",
            EncounterStatus::Pharmacy => "pharmacy",
            EncounterStatus::Billing => "billing",
            EncounterStatus::Finished => "finished",
        }
    }

    /// Parse the stored form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(EncounterStatus::Waiting),
            "triaged" => Some(EncounterStatus::Triaged),
            "doctor" => Some(EncounterStatus::Doctor),
            "pharmacy" => Some(EncounterStatus::Pharmacy),
            "billing" => Some(EncounterStatus::Billing),
            "finished" => Some(EncounterStatus::Finished),
            _ => None,
        }
    }
}

/// Payment state of a visit, independent of the workflow stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillingStatus {
    Unpaid,
    Paid,
    Pending,
}

impl BillingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingStatus::Unpaid => "unpaid",
            BillingStatus::Paid => "paid",
            BillingStatus::Pending => "pending",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unpaid" => Some(BillingStatus::Unpaid),
            "paid" => Some(BillingStatus::Paid),
            "pending" => Some(BillingStatus::Pending),
            _ => None,
        }
    }
}

/// Structured clinical note with four free-text sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SoapNote {
    /// Patient complaints, history of illness
    pub subjective: String,
    /// Physical exam results, vital signs
    pub objective: String,
    /// Diagnosis or diagnostic hypothesis
    pub assessment: String,
    /// Orders, medications, education
    pub plan: String,
}

impl SoapNote {
    /// True when no section has been filled in.
    pub fn is_empty(&self) -> bool {
        self.subjective.is_empty()
            && self.objective.is_empty()
            && self.assessment.is_empty()
            && self.plan.is_empty()
    }
}

/// One patient visit tracked through the administrative/clinical workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Encounter {
    /// Unique encounter ID
    pub id: String,
    /// Owning patient
    pub patient_id: String,
    /// Hospital where the visit takes place
    pub hospital_id: String,
    /// Kind of visit
    pub encounter_type: EncounterType,
    /// Department handling the visit
    pub department: String,
    /// Attending doctor
    pub doctor: String,
    /// Current workflow stage
    pub status: EncounterStatus,
    /// Admission timestamp, immutable
    pub created_at: String,
    /// Clinical note, attached during consultation
    pub soap: Option<SoapNote>,
    /// Payment state
    pub billing_status: BillingStatus,
    /// Total charge for the visit, set at billing
    pub total_charge: Option<f64>,
}

impl Encounter {
    /// Create a freshly admitted encounter.
    pub fn new(
        patient_id: String,
        hospital_id: String,
        encounter_type: EncounterType,
        department: String,
        doctor: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            hospital_id,
            encounter_type,
            department,
            doctor,
            status: EncounterStatus::Waiting,
            created_at: chrono::Utc::now().to_rfc3339(),
            soap: None,
            billing_status: BillingStatus::Unpaid,
            total_charge: None,
        }
    }

    /// True once the visit has been closed.
    pub fn is_finished(&self) -> bool {
        self.status == EncounterStatus::Finished
    }
}
