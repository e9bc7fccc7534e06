//! Core `VideoGenerator` trait and `ApiVideoGenerator` implementation.
//!
//! The video request is fire-and-forget from the session's point of view:
//! the orchestrator spawns it after a transcript arrives and never awaits
//! it.  Failures are logged, never surfaced — the fallback carousel keeps
//! running when no media ever shows up.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;
use crate::session::VideoResult;

/// The fixed scene prompt sent to the video service.  Deliberately not
/// derived from user input.
pub const SANTA_SCENE_PROMPT: &str = "Santa Claus in a joyous mood, background with elves \
packing gifts, cinematic style, high quality, 4k";

// ---------------------------------------------------------------------------
// VideoError
// ---------------------------------------------------------------------------

/// Errors that can occur while requesting a video.
///
/// Never surfaced to the user — the orchestrator logs these at `warn` and
/// leaves the media reference absent.
#[derive(Debug, Error)]
pub enum VideoError {
    /// The service answered with a non-success status.
    #[error("video service returned status {0}")]
    Status(u16),

    /// HTTP transport or connection error.
    #[error("video request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("video request timed out")]
    Timeout,

    /// The response body could not be parsed as the expected JSON.
    #[error("failed to parse video response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for VideoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            VideoError::Timeout
        } else {
            VideoError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Request body of `/api/generate-video`.
#[derive(Debug, Serialize)]
struct VideoRequest<'a> {
    prompt: &'a str,
}

/// Response body of `/api/generate-video`.  A missing `video_uri` means
/// "no media produced" and is not an error.
#[derive(Debug, Deserialize)]
struct VideoResponse {
    video_uri: Option<String>,
}

/// Decode a success response body into an optional [`VideoResult`].
pub fn decode_video(body: &str) -> Result<Option<VideoResult>, VideoError> {
    let response: VideoResponse =
        serde_json::from_str(body).map_err(|e| VideoError::Parse(e.to_string()))?;
    Ok(response.video_uri.map(|media_uri| VideoResult { media_uri }))
}

// ---------------------------------------------------------------------------
// VideoGenerator trait
// ---------------------------------------------------------------------------

/// Async trait for video generation.
///
/// `Ok(None)` is a valid terminal outcome: the service completed but
/// produced no media reference.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Option<VideoResult>, VideoError>;
}

// ---------------------------------------------------------------------------
// ApiVideoGenerator
// ---------------------------------------------------------------------------

/// Calls the video service over HTTP/JSON.
pub struct ApiVideoGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl ApiVideoGenerator {
    /// Build an `ApiVideoGenerator` from application config.
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
impl VideoGenerator for ApiVideoGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<VideoResult>, VideoError> {
        let url = format!("{}/api/generate-video", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&VideoRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VideoError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        decode_video(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
