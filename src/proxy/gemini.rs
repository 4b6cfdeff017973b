// src/proxy/gemini.rs
// Google Gemini generateContent client used by the proxy

use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{Span, debug, info, instrument, warn};
use uuid::Uuid;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

const TEMPERATURE: f32 = 0.8;

/// Single-prompt text generation upstream
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &str;

    /// `Ok(None)` when the upstream answered but produced no text
    async fn generate_text(&self, prompt: &str) -> Result<Option<String>, UpstreamError>;
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
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

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<u16>,
}

impl GeminiResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

/// Map an upstream answer to text or an error carrying the status to relay
fn interpret(status: u16, body: &str) -> Result<Option<String>, UpstreamError> {
    let success = (200..300).contains(&status);

    let parsed: GeminiResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !success => return Err(UpstreamError::with_status(status)),
        Err(e) => return Err(UpstreamError::new(500, format!("Invalid response from model: {e}"))),
    };

    if let Some(err) = parsed.error {
        // An error payload on a 2xx keeps the payload's own code when it is one
        let relay = if success {
            err.code.filter(|c| (400..600).contains(c)).unwrap_or(500)
        } else {
            status
        };
        return Err(match err.message {
            Some(message) if !message.is_empty() => UpstreamError::new(relay, message),
            _ => UpstreamError::with_status(relay),
        });
    }

    if !success {
        return Err(UpstreamError::with_status(status));
    }

    Ok(parsed.first_text())
}

// ============================================================================
// Client
// ============================================================================

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self::with_base_url(client, api_key, model, GEMINI_API_BASE)
    }

    pub fn with_base_url(client: reqwest::Client, api_key: String, model: String, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(request_id, model = %self.model, prompt_chars = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> Result<Option<String>, UpstreamError> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        Span::current().record("request_id", &request_id);

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        debug!("Calling Gemini generateContent");

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the key
                let e = e.without_url();
                warn!(error = %e, "Gemini request failed");
                UpstreamError::new(500, "Failed to reach the message model")
            })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::new(500, format!("Failed to read model response: {}", e.without_url())))?;

        let result = interpret(status, &text);
        match &result {
            Ok(_) => info!(
                status,
                duration_ms = start.elapsed().as_millis() as u64,
                "Gemini response received"
            ),
            Err(e) => warn!(status = e.status, error = %e, "Gemini API error"),
        }
        result
    }
}
