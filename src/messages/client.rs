// src/messages/client.rs
// Client for the message proxy: POST the prompt, hand back plain text

use super::{FALLBACK_MESSAGE, GENERATE_MESSAGE_PATH, GenerateRequest, GenerateResponse, MessageProvider};
use crate::error::MessageError;
use crate::http::{RetryPolicy, send_with_retry};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{Span, debug, info, instrument, warn};
use uuid::Uuid;

/// Talks to `POST /api/generate-message` on a RootMate proxy
pub struct ProxyClient {
    client: reqwest::Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl ProxyClient {
    /// `backend_url` may be the bare host or the full endpoint URL
    pub fn new(client: reqwest::Client, backend_url: &str) -> Self {
        Self {
            client,
            endpoint: endpoint_url(backend_url),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Append the generation path unless the URL already ends with it
pub fn endpoint_url(backend_url: &str) -> String {
    let trimmed = backend_url.trim().trim_end_matches('/');
    if trimmed.ends_with(GENERATE_MESSAGE_PATH) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{GENERATE_MESSAGE_PATH}")
    }
}

/// Turn a non-200 proxy answer into the caller-facing error string
fn error_from_body(status: StatusCode, body: &str) -> MessageError {
    if let Ok(GenerateResponse { error: Some(err), .. }) = serde_json::from_str::<GenerateResponse>(body) {
        return MessageError::ProviderUnavailable(err);
    }
    if body.trim().is_empty() {
        MessageError::ProviderUnavailable(format!("API request failed with status {}", status.as_u16()))
    } else {
        MessageError::ProviderUnavailable(format!("API request failed: {}", body.trim()))
    }
}

#[async_trait]
impl MessageProvider for ProxyClient {
    fn name(&self) -> &'static str {
        "proxy"
    }

    #[instrument(skip(self, request), fields(request_id, plant = %request.plant.nickname))]
    async fn generate(&self, request: &GenerateRequest) -> Result<String, MessageError> {
        let request_id = Uuid::new_v4().to_string();
        let start = Instant::now();
        Span::current().record("request_id", &request_id);

        debug!(
            endpoint = %self.endpoint,
            has_weather = request.weather_data.is_some(),
            "Requesting plant message"
        );

        let response = send_with_retry(&request_id, self.retry, || {
            self.client.post(&self.endpoint).json(request).send()
        })
        .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            let err = error_from_body(status, &body);
            warn!(status = %status, error = %err, "Proxy returned an error");
            return Err(err);
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| MessageError::Decode(e.to_string()))?;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Plant message received"
        );

        Ok(parsed
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()))
    }
}
