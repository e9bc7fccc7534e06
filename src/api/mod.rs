//! Remote service clients for the Santa Wishing Machine.
//!
//! This module provides:
//! * [`TranscriptGenerator`] — async trait for the transcript service.
//! * [`ApiTranscriptGenerator`] — reqwest client for `/api/generate-transcript`.
//! * [`VideoGenerator`] — async trait for the video service.
//! * [`ApiVideoGenerator`] — reqwest client for `/api/generate-video`.
//! * [`GenerationError`] / [`VideoError`] — per-service error variants.
//!
//! Both clients are built from [`ApiConfig`](crate::config::ApiConfig) and
//! speak the exact JSON wire format of the backing services; response
//! decoding is factored into pure functions so it can be tested without a
//! live server.

pub mod transcript;
pub mod video;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use transcript::{ApiTranscriptGenerator, GenerationError, TranscriptGenerator};
pub use video::{ApiVideoGenerator, VideoGenerator, VideoError, SANTA_SCENE_PROMPT};
