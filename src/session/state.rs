//! Session state machine and shared application state.
//!
//! [`Phase`] is the two-valued view mode.  [`SessionState`] is the single
//! source of truth for everything the UI needs: current phase, the active
//! transcript, the active media reference, the two independent loading
//! flags, the last error, and the carousel position.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<SessionState>>` — cheap to
//! clone and safe to share between the egui update loop and the tokio tasks.
//!
//! # State machine
//!
//! ```text
//! Input ──submit, transcript ok──▶ Result   (launches video + carousel)
//! Input ──submit, transcript err─▶ Input    (error_message set)
//! Result ──reset────────────────▶ Input    (transcript/media cleared)
//! ```

use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The two view modes of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting a new wish profile in the form.
    Input,
    /// Displaying a completed transcript and (eventually) its video.
    Result,
}

impl Phase {
    /// A short human-readable label for logging and the UI status line.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Input => "Input",
            Phase::Result => "Result",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Input
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// A narrated Santa transcript produced by the transcript service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptResult {
    /// The transcript text, displayed as an overlay in the Result phase.
    pub text: String,
}

/// A media reference produced by the video service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResult {
    /// URI of the rendered video.
    pub media_uri: String,
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Shared session state — the single source of truth for the UI.
///
/// Held behind [`SharedState`].  The orchestrator, the video task and the
/// carousel ticker mutate it; the egui update loop reads it each frame.
///
/// Invariants:
/// * `phase == Result` iff `transcript.is_some()`.
/// * `video_loading` is only true while `phase == Result`.
/// * `error_message` is only present while `phase == Input`.
/// * `carousel_index` only advances while [`carousel_active`](Self::carousel_active).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current view phase.
    pub phase: Phase,

    /// The active transcript.  `Some` iff `phase == Result`.
    pub transcript: Option<TranscriptResult>,

    /// The active media reference.  Absence is a valid, persistent terminal
    /// state — the video service may never deliver.
    pub media: Option<VideoResult>,

    /// True while the (awaited) transcript request is in flight.
    pub transcript_loading: bool,

    /// True while the (fire-and-forget) video request is in flight.
    pub video_loading: bool,

    /// Inline error shown in the Input phase after a failed submission.
    pub error_message: Option<String>,

    /// Position in the placeholder image rotation, in `[0, image_count)`.
    pub carousel_index: usize,

    /// Arm/disarm generation for the carousel ticker.  Bumped on every
    /// Result entry and on reset; a ticker whose captured epoch no longer
    /// matches exits without mutating state.
    pub carousel_epoch: u64,
}

impl SessionState {
    /// A fresh session in the Input phase.
    pub fn new() -> Self {
        Self {
            phase: Phase::Input,
            transcript: None,
            media: None,
            transcript_loading: false,
            video_loading: false,
            error_message: None,
            carousel_index: 0,
            carousel_epoch: 0,
        }
    }

    /// Whether the fallback carousel should be cycling: the Result phase is
    /// active and no media reference has arrived yet.
    pub fn carousel_active(&self) -> bool {
        self.phase == Phase::Result && self.media.is_none()
    }

    /// Enter the Result phase with a fresh transcript.
    ///
    /// Clears any prior error and media, rewinds the carousel, bumps the
    /// carousel epoch, and marks the video request as in flight (the
    /// orchestrator spawns it immediately after this transition).
    pub fn enter_result(&mut self, transcript: TranscriptResult) {
        self.phase = Phase::Result;
        self.transcript = Some(transcript);
        self.media = None;
        self.error_message = None;
        self.carousel_index = 0;
        self.carousel_epoch += 1;
        self.video_loading = true;
    }

    /// Return to the Input phase, discarding the transcript and media.
    ///
    /// Loading flags are cleared and the carousel epoch is bumped so any
    /// live ticker disarms on its next tick.  Form field contents live in
    /// the UI layer and are not affected.
    pub fn reset(&mut self) {
        self.phase = Phase::Input;
        self.transcript = None;
        self.media = None;
        self.video_loading = false;
        self.error_message = None;
        self.carousel_index = 0;
        self.carousel_epoch += 1;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SessionState`].
///
/// Cheap to clone (`Arc` clone).  Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<SessionState>>;

/// Construct a new [`SharedState`] wrapping a fresh [`SessionState`].
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(SessionState::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
