use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::GenerationConfig;

use super::{GenerationError, Generator};

/// Client for the Gemini `generateContent` endpoint.
///
/// Each request is bounded by a timeout. Transport failures, HTTP 429 and
/// HTTP 5xx are retried with exponential backoff; other statuses fail at once.
pub struct GeminiClient {
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
    max_retries: u32,
    backoff_base: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Outcome of one HTTP attempt.
enum Attempt {
    Done(String),
    Retry(String),
    Fail(GenerationError),
}

impl GeminiClient {
    /// Fails when no API key is configured.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client,
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }

    async fn attempt(&self, prompt: &str) -> Attempt {
        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = match self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(format!("request failed: {}", e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                return Attempt::Retry(format!("HTTP {}: {}", status.as_u16(), body));
            }
            return Attempt::Fail(GenerationError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // a body that stalls or drops mid-read is a transport failure
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Attempt::Retry(format!("reading response failed: {}", e)),
        };

        let parsed: GenerateResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) => return Attempt::Fail(GenerationError::InvalidResponse(e.to_string())),
        };

        match extract_text(parsed) {
            Some(text) => Attempt::Done(text),
            None => Attempt::Fail(GenerationError::EmptyResponse),
        }
    }
}

/// Concatenated text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Option<String> {
    let parts = response.candidates.into_iter().next()?.content?.parts;
    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let attempts = self.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            debug!(attempt, attempts, model = %self.model, "calling Gemini");

            match self.attempt(prompt).await {
                Attempt::Done(text) => return Ok(text),
                Attempt::Fail(error) => return Err(error),
                Attempt::Retry(reason) => {
                    warn!(attempt, attempts, %reason, "Gemini call failed");
                    last_error = reason;
                    if attempt < attempts {
                        tokio::time::sleep(self.backoff(attempt)).await;
                    }
                }
            }
        }

        Err(GenerationError::RetriesExhausted {
            attempts,
            last_error,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
