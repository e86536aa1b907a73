//! Gemini client for flash card generation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::error::{Error, Result};

use super::parser::{parse_deck, GeneratedDeck};
use super::prompt::PromptBuilder;

/// Seam between the ingest pipeline and the external generative model.
///
/// The call is a single awaited request; the caller receives either a fully
/// validated deck or a typed error. No retry is performed here; failure is
/// terminal for the request.
#[async_trait]
pub trait CardGenerator: Send + Sync {
    /// Generate a summary and flash cards for the extracted text.
    async fn generate(&self, content: &str) -> Result<GeneratedDeck>;
}

/// Google generative language API client
pub struct GeminiClient {
    /// HTTP client with the bounded request timeout baked in
    client: Client,
    /// Configuration (key, endpoint, model)
    config: AiConfig,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Create a new client from explicit configuration.
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn request_completion(&self, prompt: String) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "generation request failed");
                Error::generation(format!("request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body, "generation request returned error status");
            return Err(Error::generation(format!("HTTP {}", status)));
        }

        let response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("failed to parse API response: {}", e)))?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::generation("model returned no candidates"))?;

        Ok(text)
    }
}

#[async_trait]
impl CardGenerator for GeminiClient {
    async fn generate(&self, content: &str) -> Result<GeneratedDeck> {
        let prompt = PromptBuilder::flash_card_prompt(content, self.config.min_cards);

        tracing::info!(model = %self.config.model, "generating flash cards");
        let raw = self.request_completion(prompt).await?;

        parse_deck(&raw)
    }
}
