//! Session orchestrator — drives the submit → transcript → video flow.
//!
//! [`SessionOrchestrator`] owns the [`SharedState`] and responds to
//! [`SessionCommand`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Flow
//!
//! ```text
//! SessionCommand::Submit(WishRequest)
//!   └─▶ transcript_loading = true, clear error + transcript
//!       transcript.generate(..).await                 ← blocking for the loop
//!         ├─ Err → error_message set, phase stays Input
//!         └─ Ok  → phase = Result, video_loading = true
//!                   ├─ tokio::spawn(video task)       ← fire-and-forget
//!                   └─ tokio::spawn(carousel ticker)
//!
//! SessionCommand::Reset
//!   └─▶ clear transcript/media/flags, phase = Input (epoch bump disarms
//!       the carousel; in-flight video completions are NOT cancelled and
//!       may still land afterwards)
//! ```
//!
//! The transcript call is awaited because the Result transition depends on
//! its outcome; the video call is never awaited by anything.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::api::{TranscriptGenerator, VideoGenerator, SANTA_SCENE_PROMPT};
use crate::form::WishRequest;
use crate::session::carousel::run_carousel;
use crate::session::state::{Phase, SharedState};

// ---------------------------------------------------------------------------
// SessionCommand
// ---------------------------------------------------------------------------

/// Commands sent from the UI to the session orchestrator.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// A validated wish profile was submitted from the form.
    Submit(WishRequest),
    /// The user asked to create another message.
    Reset,
}

// ---------------------------------------------------------------------------
// SessionOrchestrator
// ---------------------------------------------------------------------------

/// Drives the full wish-submission flow.
///
/// Create with [`SessionOrchestrator::new`], then call [`run`](Self::run)
/// inside a tokio task.  The UI holds the sending half of the command
/// channel and reads the shared state each frame.
pub struct SessionOrchestrator {
    state: SharedState,
    transcript: Arc<dyn TranscriptGenerator>,
    video: Arc<dyn VideoGenerator>,
    carousel_period: Duration,
    image_count: usize,
}

impl SessionOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Arguments
    ///
    /// * `state`           — shared session state (also read by the UI).
    /// * `transcript`      — transcript service client.
    /// * `video`           — video service client.
    /// * `carousel_period` — time between placeholder rotations.
    /// * `image_count`     — size of the placeholder image set.
    pub fn new(
        state: SharedState,
        transcript: Arc<dyn TranscriptGenerator>,
        video: Arc<dyn VideoGenerator>,
        carousel_period: Duration,
        image_count: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            video,
            carousel_period,
            image_count,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// Should be spawned as a tokio task from `main()`.  Submissions are
    /// handled sequentially: a `Submit` occupies the loop until its
    /// transcript request resolves.
    pub async fn run(self, mut command_rx: mpsc::Receiver<SessionCommand>) {
        while let Some(cmd) = command_rx.recv().await {
            match cmd {
                SessionCommand::Submit(request) => {
                    self.handle_submit(request).await;
                }
                SessionCommand::Reset => {
                    self.handle_reset();
                }
            }
        }

        log::info!("session: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handlers
    // -----------------------------------------------------------------------

    /// Handle a form submission: awaited transcript request, then (on
    /// success) the fire-and-forget video request and the carousel ticker.
    async fn handle_submit(&self, request: WishRequest) {
        log::debug!("session: submit for {:?}", request.name);

        {
            let mut st = self.state.lock().unwrap();
            st.transcript_loading = true;
            st.error_message = None;
            st.transcript = None;
        }

        let result = self.transcript.generate(&request).await;

        match result {
            Ok(transcript) => {
                let epoch = {
                    let mut st = self.state.lock().unwrap();
                    st.enter_result(transcript);
                    st.transcript_loading = false;
                    st.carousel_epoch
                };
                log::debug!("session: transcript ready, entering Result phase");

                self.spawn_video_task();
                tokio::spawn(run_carousel(
                    Arc::clone(&self.state),
                    self.carousel_period,
                    self.image_count,
                    epoch,
                ));
            }
            Err(e) => {
                log::warn!("session: transcript generation failed: {e}");
                let mut st = self.state.lock().unwrap();
                st.transcript_loading = false;
                st.error_message = Some(e.to_string());
                // Phase stays Input; the form keeps its field values.
            }
        }
    }

    /// Handle a user-triggered reset from the Result phase.
    ///
    /// In-flight requests are not cancelled: a late video completion may
    /// still repopulate `media` afterwards.
    fn handle_reset(&self) {
        let mut st = self.state.lock().unwrap();
        if st.phase == Phase::Result {
            log::debug!("session: reset to Input phase");
        }
        st.reset();
    }

    // -----------------------------------------------------------------------
    // Video task
    // -----------------------------------------------------------------------

    /// Spawn the non-blocking video request.
    ///
    /// `video_loading` was already set inside the Result transition; this
    /// task clears it on every outcome.  Failures are logged only — the
    /// fallback carousel keeps running and `media` stays absent.
    fn spawn_video_task(&self) {
        let video = Arc::clone(&self.video);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let outcome = video.generate(SANTA_SCENE_PROMPT).await;

            let mut st = state.lock().unwrap();
            match outcome {
                Ok(Some(media)) => {
                    log::debug!("session: video ready at {}", media.media_uri);
                    st.media = Some(media);
                }
                Ok(None) => {
                    log::debug!("session: video service produced no media");
                }
                Err(e) => {
                    log::warn!("session: video generation failed: {e}");
                }
            }
            st.video_loading = false;
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GenerationError, VideoError};
    use crate::session::state::{new_shared_state, TranscriptResult, VideoResult};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Transcript generator that always succeeds with a fixed text.
    struct OkTranscript(String);

    #[async_trait]
    impl TranscriptGenerator for OkTranscript {
        async fn generate(
            &self,
            _request: &WishRequest,
        ) -> Result<TranscriptResult, GenerationError> {
            Ok(TranscriptResult {
                text: self.0.clone(),
            })
        }
    }

    /// Transcript generator that always fails with a service message.
    struct FailTranscript(String);

    #[async_trait]
    impl TranscriptGenerator for FailTranscript {
        async fn generate(
            &self,
            _request: &WishRequest,
        ) -> Result<TranscriptResult, GenerationError> {
            Err(GenerationError::Service(self.0.clone()))
        }
    }

    /// Video generator that records the prompt it was called with and
    /// returns a fixed outcome.
    struct RecordingVideo {
        prompts: Mutex<Vec<String>>,
        outcome: fn() -> Result<Option<VideoResult>, VideoError>,
        /// When set, the call waits until notified before completing.
        gate: Option<Arc<Notify>>,
    }

    impl RecordingVideo {
        fn succeeding() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                outcome: || {
                    Ok(Some(VideoResult {
                        media_uri: "https://x/y.mp4".into(),
                    }))
                },
                gate: None,
            }
        }

        fn empty() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                outcome: || Ok(None),
                gate: None,
            }
        }

        fn failing() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                outcome: || Err(VideoError::Request("connection refused".into())),
                gate: None,
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                outcome: || {
                    Ok(Some(VideoResult {
                        media_uri: "https://x/y.mp4".into(),
                    }))
                },
                gate: Some(gate),
            }
        }
    }

    #[async_trait]
    impl VideoGenerator for RecordingVideo {
        async fn generate(&self, prompt: &str) -> Result<Option<VideoResult>, VideoError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            (self.outcome)()
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn wish() -> WishRequest {
        WishRequest {
            name: "Lina".into(),
            nice_items: "helped grandma".into(),
            naughty_items: "".into(),
            gift_wishes: "a red bicycle".into(),
        }
    }

    fn make_orchestrator(
        transcript: Arc<dyn TranscriptGenerator>,
        video: Arc<dyn VideoGenerator>,
    ) -> (SessionOrchestrator, SharedState) {
        let state = new_shared_state();
        let orc = SessionOrchestrator::new(
            Arc::clone(&state),
            transcript,
            video,
            Duration::from_millis(4000),
            3,
        );
        (orc, state)
    }

    /// Drive the orchestrator with the given commands and wait for the loop
    /// to finish, then give spawned tasks a chance to run.
    async fn drive(orc: SessionOrchestrator, commands: Vec<SessionCommand>) {
        let (tx, rx) = mpsc::channel(8);
        for cmd in commands {
            tx.send(cmd).await.unwrap();
        }
        drop(tx);
        orc.run(rx).await;
        // Let the fire-and-forget video task complete.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    /// A successful submission enters the Result phase with the transcript,
    /// and the video request is issued with the fixed scene prompt.
    #[tokio::test]
    async fn submit_success_enters_result_and_fires_video() {
        let video = Arc::new(RecordingVideo::empty());
        let (orc, state) = make_orchestrator(
            Arc::new(OkTranscript("Ho ho ho!".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(orc, vec![SessionCommand::Submit(wish())]).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Result);
        assert_eq!(st.transcript.as_ref().unwrap().text, "Ho ho ho!");
        assert!(!st.transcript_loading);

        let prompts = video.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), [SANTA_SCENE_PROMPT]);
    }

    /// A failed submission surfaces the service detail and stays in Input.
    #[tokio::test]
    async fn submit_failure_sets_error_and_stays_input() {
        let video = Arc::new(RecordingVideo::empty());
        let (orc, state) = make_orchestrator(
            Arc::new(FailTranscript("too naughty".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(orc, vec![SessionCommand::Submit(wish())]).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Input);
        assert!(st.transcript.is_none());
        assert_eq!(st.error_message.as_deref(), Some("too naughty"));
        assert!(!st.transcript_loading);

        // No transcript → no video request.
        assert!(video.prompts.lock().unwrap().is_empty());
    }

    /// A successful retry after a failure clears the earlier error.
    #[tokio::test]
    async fn retry_after_failure_clears_error() {
        let video = Arc::new(RecordingVideo::empty());
        let (orc, state) = make_orchestrator(
            Arc::new(FailTranscript("too naughty".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );
        drive(orc, vec![SessionCommand::Submit(wish())]).await;
        assert!(state.lock().unwrap().error_message.is_some());

        let orc = SessionOrchestrator::new(
            Arc::clone(&state),
            Arc::new(OkTranscript("Ho ho ho!".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
            Duration::from_millis(4000),
            3,
        );
        drive(orc, vec![SessionCommand::Submit(wish())]).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Result);
        assert!(st.error_message.is_none());
    }

    /// A successful video completion stores the media reference and clears
    /// the loading flag; the carousel predicate turns false.
    #[tokio::test]
    async fn video_success_stores_media() {
        let video = Arc::new(RecordingVideo::succeeding());
        let (orc, state) = make_orchestrator(
            Arc::new(OkTranscript("Ho ho ho!".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(orc, vec![SessionCommand::Submit(wish())]).await;

        let st = state.lock().unwrap();
        assert_eq!(st.media.as_ref().unwrap().media_uri, "https://x/y.mp4");
        assert!(!st.video_loading);
        assert!(!st.carousel_active());
    }

    /// A video failure is swallowed: no error surfaces, media stays absent,
    /// the carousel keeps going.
    #[tokio::test]
    async fn video_failure_is_silent() {
        let video = Arc::new(RecordingVideo::failing());
        let (orc, state) = make_orchestrator(
            Arc::new(OkTranscript("Ho ho ho!".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(orc, vec![SessionCommand::Submit(wish())]).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Result);
        assert!(st.media.is_none());
        assert!(st.error_message.is_none());
        assert!(!st.video_loading);
        assert!(st.carousel_active());
    }

    /// A video completing with no `video_uri` leaves media absent for good.
    #[tokio::test]
    async fn video_without_uri_leaves_media_absent() {
        let video = Arc::new(RecordingVideo::empty());
        let (orc, state) = make_orchestrator(
            Arc::new(OkTranscript("Ho ho ho!".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(orc, vec![SessionCommand::Submit(wish())]).await;

        let st = state.lock().unwrap();
        assert!(st.media.is_none());
        assert!(!st.video_loading);
    }

    /// Reset returns to Input with transcript and media cleared, even while
    /// a video request is still outstanding.
    #[tokio::test]
    async fn reset_clears_state_with_video_outstanding() {
        let gate = Arc::new(Notify::new());
        let video = Arc::new(RecordingVideo::gated(Arc::clone(&gate)));
        let (orc, state) = make_orchestrator(
            Arc::new(OkTranscript("Ho ho ho!".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(
            orc,
            vec![SessionCommand::Submit(wish()), SessionCommand::Reset],
        )
        .await;

        {
            let st = state.lock().unwrap();
            assert_eq!(st.phase, Phase::Input);
            assert!(st.transcript.is_none());
            assert!(st.media.is_none());
            assert!(!st.video_loading);
        }

        // Release the gated video request so the task does not leak.
        gate.notify_one();
        tokio::task::yield_now().await;
    }

    /// Observed race, preserved deliberately: a video completion that lands
    /// after a reset still writes its media reference into the session.
    #[tokio::test]
    async fn late_video_completion_repopulates_media_after_reset() {
        let gate = Arc::new(Notify::new());
        let video = Arc::new(RecordingVideo::gated(Arc::clone(&gate)));
        let (orc, state) = make_orchestrator(
            Arc::new(OkTranscript("Ho ho ho!".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(
            orc,
            vec![SessionCommand::Submit(wish()), SessionCommand::Reset],
        )
        .await;
        assert!(state.lock().unwrap().media.is_none());

        gate.notify_one();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        let st = state.lock().unwrap();
        assert!(st.media.is_some());
        assert_eq!(st.phase, Phase::Input);
    }

    /// Reset in the Input phase is a no-op state-wise and must not panic.
    #[tokio::test]
    async fn reset_from_input_is_harmless() {
        let video = Arc::new(RecordingVideo::empty());
        let (orc, state) = make_orchestrator(
            Arc::new(OkTranscript("unused".into())),
            Arc::clone(&video) as Arc<dyn VideoGenerator>,
        );

        drive(orc, vec![SessionCommand::Reset]).await;

        let st = state.lock().unwrap();
        assert_eq!(st.phase, Phase::Input);
        assert!(st.error_message.is_none());
    }
}
