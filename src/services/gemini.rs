// src/services/gemini.rs
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::AppError;

// Request/response shapes for the generateContent endpoint.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<UpstreamError>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct UpstreamError {
    code: Option<i64>,
    message: Option<String>,
    status: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// One POST, one answer: the first candidate's first text part.
    pub async fn generate_content(&self, api_key: &str, prompt: &str) -> Result<String, AppError> {
        let payload = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");

        // The key rides in the query string, so reqwest errors are stripped of their URL.
        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::Transport(format!("unreadable body ({status}): {}", e.without_url())))?;

        if let Some(err) = body.error {
            error!(code = ?err.code, status = ?err.status, "Generative API returned an error");
            return Err(AppError::Upstream(
                err.message
                    .unwrap_or_else(|| "unknown upstream error".to_string()),
            ));
        }

        body.first_text().ok_or_else(|| {
            AppError::Transport(format!("no candidate text in response ({status})"))
        })
    }
}
