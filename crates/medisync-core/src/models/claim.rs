//! Insurance claim records.

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Processing state of a claim at the insurer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClaimStatus {
    /// Prepared locally, not yet sent
    Draft,
    /// Sent to the insurer
    Submitted,
    /// Under adjudication
    Processing,
    /// Reimbursement approved
    Approved,
    /// Reimbursement denied
    Rejected,
    /// Insurer requested more documentation
    Incomplete,
}

impl ClaimStatus {
    /// Display/storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "Draft",
            ClaimStatus::Submitted => "Submitted",
            ClaimStatus::Processing => "Processing",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Incomplete => "Incomplete",
        }
    }

    /// Parse the stored form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Draft" => Some(ClaimStatus::Draft),
            "Submitted" => Some(ClaimStatus::Submitted),
            "Processing" => Some(ClaimStatus::Processing),
            "Approved" => Some(ClaimStatus::Approved),
            "Rejected" => Some(ClaimStatus::Rejected),
            "Incomplete" => Some(ClaimStatus::Incomplete),
            _ => None,
        }
    }

    /// Position along the adjudication pipeline. Terminal outcomes share a
    /// stage; a move to a lower stage is out of order.
    pub fn stage(&self) -> u8 {
        match self {
            ClaimStatus::Draft => 0,
            ClaimStatus::Submitted => 1,
            ClaimStatus::Processing => 2,
            ClaimStatus::Approved | ClaimStatus::Rejected | ClaimStatus::Incomplete => 3,
        }
    }
}

/// A request for insurance reimbursement tied to one encounter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claim {
    /// Display identifier (CLM-XXXXX)
    pub id: String,
    /// The encounter being claimed
    pub encounter_id: String,
    /// The insurer the claim is bridged to
    pub provider_id: String,
    /// Adjudication state
    pub status: ClaimStatus,
    /// Amount claimed, copied from the encounter charge at submission
    pub amount: f64,
    /// Submission timestamp
    pub submitted_at: String,
    /// Free-text annotations
    pub notes: Option<String>,
}

impl Claim {
    /// Create a claim in `Submitted` state.
    pub fn new(encounter_id: String, provider_id: String, amount: f64) -> Self {
        Self {
            id: generate_claim_id(),
            encounter_id,
            provider_id,
            status: ClaimStatus::Submitted,
            amount,
            submitted_at: chrono::Utc::now().to_rfc3339(),
            notes: None,
        }
    }
}

/// Generate a display claim identifier (CLM-XXXXX).
///
/// Uniqueness is enforced by the caller against the store.
pub fn generate_claim_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(5)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("CLM-{}", suffix)
}
