//! Gemini `generateContent` completion client.
//!
//! Features:
//! - credential sent as the `key` query parameter
//! - single-turn request: `{ contents: [{ parts: [{ text }] }] }`
//! - reply text read from `candidates[0].content.parts[0].text`
//!
//! No streaming, retries or client-side timeout.

use async_trait::async_trait;
use sagebot_core::error::CompletionError;
use sagebot_core::provider::{CompletionRequest, CompletionService};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-pro";

/// Gemini native completion client.
pub struct GeminiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Use a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body(prompt: &str) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }

    /// The text of the first part of the first candidate, if any.
    fn extract_text(response: GenerateResponse) -> Option<String> {
        response
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl CompletionService for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        debug!(
            provider = "gemini",
            model = %self.model,
            persona = %request.persona,
            prompt_len = request.prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(request.prompt))
            .send()
            .await
            // the URL carries the credential
            .map_err(|e| CompletionError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Gemini API error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.without_url().to_string()))?;

        debug!(candidates = parsed.candidates.len(), "Gemini response received");
        Self::extract_text(parsed).ok_or(CompletionError::EmptyReply)
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
