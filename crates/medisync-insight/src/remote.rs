//! Remote text-generation backend over the Gemini REST API.
//!
//! Gated behind the `remote` feature so offline builds stay dependency-free.

use serde::{Deserialize, Serialize};

use crate::prompts::DEFAULT_MODEL;
use crate::summarizer::{InsightError, InsightResult, TextCompletion};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Blocking client for the generateContent endpoint.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client using the default model.
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model id.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

impl TextCompletion for GeminiClient {
    fn complete(&self, prompt: &str) -> InsightResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| InsightError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InsightError::Backend(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .map_err(|e| InsightError::Backend(e.to_string()))?;
        extract_text(&body)
    }
}

/// Pull the first candidate's text out of a generateContent response.
fn extract_text(response: &GenerateContentResponse) -> InsightResult<String> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .ok_or_else(|| InsightError::InvalidResponse("no candidates in response".into()))
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
