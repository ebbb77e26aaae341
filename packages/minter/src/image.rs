//! Text-to-image generation client.
//!
//! Posts the submission description to the model endpoint and returns the
//! binary payload with its reported content type. A 503 from the backend
//! means the model is still warming up and is retried with backoff.

use crate::metrics::METRICS;
use crate::Error;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use std::sync::atomic::Ordering;
use tracing::{info, warn};

/// Retries after the initial attempt when the model reports warm-up (503).
const MAX_RETRIES: u32 = 2;
/// Base delay for exponential backoff between warm-up retries (ms).
const BASE_DELAY_MS: u64 = 2_000;

/// Client for the image generation backend.
pub struct ImageClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

/// One generated image: raw payload plus the backend's reported content type.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Bytes,
    pub content_type: String,
}

impl GeneratedImage {
    /// Encode as a displayable `data:` URL using the reported content type.
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

impl ImageClient {
    pub fn new(http: reqwest::Client, endpoint: &str, token: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    /// Generate an image from `prompt`. The prompt is passed verbatim as the
    /// sole model input.
    pub async fn generate(&self, prompt: &str) -> Result<GeneratedImage, Error> {
        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = retry_delay(attempt - 1);
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Model warming up, retrying generation"
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .http
                .post(&self.endpoint)
                .bearer_auth(&self.token)
                .json(&serde_json::json!({
                    "inputs": prompt,
                    "options": { "wait_for_model": true }
                }))
                .send()
                .await
                .map_err(|e| Error::Generate(format!("request failed: {e}")))?;

            let status = response.status();
            if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
                METRICS.generate_retries.fetch_add(1, Ordering::Relaxed);
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Generate(format!(
                    "model endpoint returned {status}: {body}"
                )));
            }

            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("image/jpeg")
                .to_string();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::Generate(format!("reading image payload: {e}")))?;

            info!(
                bytes = bytes.len(),
                content_type = %content_type,
                "Image generated"
            );

            return Ok(GeneratedImage {
                bytes,
                content_type,
            });
        }

        Err(Error::Generate(format!(
            "model did not become ready after {MAX_RETRIES} retries"
        )))
    }
}

/// Retry delay for attempt n (0-indexed).
fn retry_delay(attempt: u32) -> std::time::Duration {
    std::time::Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt))
}
