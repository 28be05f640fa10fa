//! Summarizer seam, fallbacks and the offline mock backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::prompts;

/// Summarizer errors. Internal to this crate: the public helpers absorb
/// them into fallback strings.
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type InsightResult<T> = Result<T, InsightError>;

/// Fallback shown when the SOAP assistant call fails.
pub const SOAP_FALLBACK: &str = "Error getting medical assistance.";
/// Fallback shown when the dashboard insight call fails.
pub const CENSUS_FALLBACK: &str = "Insights unavailable.";
/// Default when the assistant returns an empty suggestion.
pub const SOAP_EMPTY_DEFAULT: &str = "No suggestions available.";
/// Default when the insight feed returns an empty summary.
pub const CENSUS_EMPTY_DEFAULT: &str = "Trends stable.";

/// The four sections of a clinical note, as this crate sees them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SoapSections {
    pub subjective: String,
    pub objective: String,
    pub assessment: String,
    pub plan: String,
}

/// One encounter reduced to the pair the insight feed works on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncounterDigest {
    #[serde(rename = "dep")]
    pub department: String,
    pub status: String,
}

/// The request/response seam to the text-generation service.
pub trait TextCompletion {
    /// Send one prompt, get one free-text reply.
    fn complete(&self, prompt: &str) -> InsightResult<String>;
}

/// Get a refined-plan suggestion for a clinical note.
///
/// Never fails: backend errors collapse to [`SOAP_FALLBACK`], empty replies
/// to [`SOAP_EMPTY_DEFAULT`].
pub fn soap_assist<C: TextCompletion>(client: &C, note: &SoapSections) -> String {
    let prompt = prompts::make_soap_prompt(note);
    match client.complete(&prompt) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                SOAP_EMPTY_DEFAULT.to_string()
            } else {
                text.to_string()
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "SOAP assistant call failed");
            SOAP_FALLBACK.to_string()
        }
    }
}

/// Get operational-trend commentary over a batch of encounter digests.
///
/// Never fails: backend errors collapse to [`CENSUS_FALLBACK`], empty
/// replies to [`CENSUS_EMPTY_DEFAULT`].
pub fn census_insights<C: TextCompletion>(client: &C, digests: &[EncounterDigest]) -> String {
    let prompt = prompts::make_census_prompt(digests);
    match client.complete(&prompt) {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                CENSUS_EMPTY_DEFAULT.to_string()
            } else {
                text.to_string()
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "dashboard insight call failed");
            CENSUS_FALLBACK.to_string()
        }
    }
}

/// Offline summarizer producing deterministic commentary (for testing and
/// air-gapped deployments).
pub struct MockSummarizer;

impl TextCompletion for MockSummarizer {
    fn complete(&self, prompt: &str) -> InsightResult<String> {
        if prompt.contains("SOAP note") {
            return Ok(
                "Plan: symptomatic therapy, targeted labs per assessment, review in 48 hours."
                    .to_string(),
            );
        }

        // Census prompt: tally the embedded status values
        let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
        for status in [
            "waiting", "triaged", "doctor", "pharmacy", "billing", "finished",
        ] {
            let needle = format!("\"status\":\"{}\"", status);
            let count = prompt.matches(&needle).count();
            if count > 0 {
                tally.insert(status, count);
            }
        }

        if tally.is_empty() {
            return Ok(String::new());
        }

        let lines: Vec<String> = tally
            .iter()
            .map(|(status, count)| format!("- {} encounter(s) in {}", count, status))
            .collect();
        Ok(lines.join("\n"))
    }
}
