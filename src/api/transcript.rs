//! Core `TranscriptGenerator` trait and `ApiTranscriptGenerator` implementation.
//!
//! `ApiTranscriptGenerator` posts a [`WishRequest`] to the transcript
//! service's `/api/generate-transcript` endpoint and returns the narrated
//! Santa transcript.  All connection details come from [`ApiConfig`];
//! nothing is hardcoded.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::form::WishRequest;
use crate::session::TranscriptResult;

/// Fallback error message used when a failure response carries no `detail`
/// field (or the body cannot be parsed at all).
pub const GENERATION_FALLBACK_MESSAGE: &str = "Failed to generate transcript";

// ---------------------------------------------------------------------------
// GenerationError
// ---------------------------------------------------------------------------

/// Errors that can occur while generating a transcript.
///
/// This is the only error class that is surfaced to the user, via `Display`.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The service answered with a non-success status.  Carries the `detail`
    /// message from the response body, or the fixed fallback string.
    #[error("{0}")]
    Service(String),

    /// HTTP transport or connection error.
    #[error("Could not reach the North Pole: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("The North Pole took too long to answer")]
    Timeout,

    /// A success response could not be parsed as the expected JSON.
    #[error("Failed to read Santa's reply: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Success response body of `/api/generate-transcript`.
#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    transcript: String,
}

/// Failure response body — the `detail` field is surfaced verbatim.
#[derive(Debug, Deserialize)]
struct FailureResponse {
    detail: Option<String>,
}

/// Extract the user-facing message from a failure response body.
///
/// Returns the `detail` field when present, otherwise the fixed fallback
/// string.  A body that is not valid JSON also yields the fallback.
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<FailureResponse>(body)
        .ok()
        .and_then(|f| f.detail)
        .unwrap_or_else(|| GENERATION_FALLBACK_MESSAGE.to_string())
}

/// Decode a success response body into a [`TranscriptResult`].
pub fn decode_transcript(body: &str) -> Result<TranscriptResult, GenerationError> {
    let response: TranscriptResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;
    Ok(TranscriptResult {
        text: response.transcript,
    })
}

// ---------------------------------------------------------------------------
// TranscriptGenerator trait
// ---------------------------------------------------------------------------

/// Async trait for transcript generation.
///
/// Implementors must be `Send + Sync` so they can be shared across tasks
/// (e.g. wrapped in `Arc<dyn TranscriptGenerator>`).
#[async_trait]
pub trait TranscriptGenerator: Send + Sync {
    /// Generate a narrated Santa transcript for the given wish profile.
    ///
    /// The caller awaits this — the session cannot enter the Result phase
    /// until it resolves.
    async fn generate(&self, request: &WishRequest) -> Result<TranscriptResult, GenerationError>;
}

// ---------------------------------------------------------------------------
// ApiTranscriptGenerator
// ---------------------------------------------------------------------------

/// Calls the transcript service over HTTP/JSON.
pub struct ApiTranscriptGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl ApiTranscriptGenerator {
    /// Build an `ApiTranscriptGenerator` from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`.  A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &ApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }
}

#[async_trait]
impl TranscriptGenerator for ApiTranscriptGenerator {
    async fn generate(&self, request: &WishRequest) -> Result<TranscriptResult, GenerationError> {
        let url = format!("{}/api/generate-transcript", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GenerationError::Service(failure_message(&body)));
        }

        decode_transcript(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
