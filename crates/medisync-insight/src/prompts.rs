//! Prompts for the clinical assistant and the dashboard insight feed.

use crate::summarizer::{EncounterDigest, SoapSections};

/// Default text-generation model.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Build the SOAP-assistant prompt.
///
/// The assistant sees the first three sections and is asked to refine the
/// Plan; the existing Plan is deliberately withheld so the suggestion is
/// independent.
pub fn make_soap_prompt(note: &SoapSections) -> String {
    format!(
        r#"You are a professional medical assistant. Analyze the following SOAP note and suggest a refined Plan or potential Differential Diagnoses. Use professional medical terminology but keep it concise.
Subjective: {}
Objective: {}
Assessment: {}
"#,
        note.subjective, note.objective, note.assessment
    )
}

/// Build the dashboard insight prompt over a batch of encounter digests.
pub fn make_census_prompt(digests: &[EncounterDigest]) -> String {
    // Digest serialization cannot fail: two plain string fields
    let data = serde_json::to_string(digests).unwrap_or_else(|_| "[]".into());
    format!(
        r#"Analyze these {} patient encounters and provide a brief summary of operational trends (status distribution, top departments).
Keep it to 2-3 bullet points. Data: {}"#,
        digests.len(),
        data
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_prompt_includes_sections() {
        let note = SoapSections {
            subjective: "Demam 3 hari".into(),
            objective: "T: 38.5C".into(),
            assessment: "Suspect Typhoid".into(),
            plan: "Widal test".into(),
        };
        let prompt = make_soap_prompt(&note);
        assert!(prompt.contains("Subjective: Demam 3 hari"));
        assert!(prompt.contains("Objective: T: 38.5C"));
        assert!(prompt.contains("Assessment: Suspect Typhoid"));
        // The plan is the assistant's to write
        assert!(!prompt.contains("Widal test"));
    }

    #[test]
    fn test_census_prompt_embeds_data() {
        let digests = vec![
            EncounterDigest {
                department: "Emergency".into(),
                status: "waiting".into(),
            },
            EncounterDigest {
                department: "Pediatrics".into(),
                status: "finished".into(),
            },
        ];
        let prompt = make_census_prompt(&digests);
        assert!(prompt.contains("these 2 patient encounters"));
        assert!(prompt.contains("Emergency"));
        assert!(prompt.contains("waiting"));
    }
}
