//! Transition rules for the visit workflow.
//!
//! The workflow order is fixed: waiting → triaged → doctor → pharmacy →
//! billing → finished. A record may jump forward over intermediate stages
//! (ER cases skip triage, a cash patient skips the claim desk), but never
//! moves backward or stays in place.

use crate::models::EncounterStatus;

/// Check whether a status change moves strictly forward along the
/// workflow order.
pub fn is_forward(from: EncounterStatus, to: EncounterStatus) -> bool {
    to > from
}

/// Stages from which a consultation can be finalized straight to pharmacy.
pub fn can_finalize_to_pharmacy(from: EncounterStatus) -> bool {
    matches!(
        from,
        EncounterStatus::Waiting | EncounterStatus::Triaged | EncounterStatus::Doctor
    )
}
