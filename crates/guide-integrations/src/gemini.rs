//! Gemini `generateContent` client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use guide_common::GeminiConfig;
use guide_core::{ChatModel, GatewayError};

/// Returned when the model answers with blank text
pub const FALLBACK_REPLY: &str = "I cannot produce an answer right now, please try again.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, trimmed
    fn into_reply(self) -> String {
        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();

        let trimmed = text.trim();
        if trimmed.is_empty() {
            FALLBACK_REPLY.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("api_base", &self.config.api_base)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e.without_url(), "Gemini request failed");
                GatewayError::Upstream("request failed".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "Gemini returned an error status");
            return Err(GatewayError::Upstream(format!("status {status}")));
        }

        let parsed = response.json::<GenerateResponse>().await.map_err(|e| {
            tracing::error!(error = %e.without_url(), "Gemini response was not understood");
            GatewayError::Upstream("invalid response".to_string())
        })?;

        Ok(parsed.into_reply())
    }
}

/// Stand-in used when `GEMINI_API_KEY` is absent
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledChatModel;

#[async_trait]
impl ChatModel for DisabledChatModel {
    fn is_enabled(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GatewayError> {
        Err(GatewayError::Disabled("AI assistant"))
    }
}
