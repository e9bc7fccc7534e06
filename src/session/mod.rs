//! Session module — the view state machine and its orchestration.
//!
//! This module wires the full submit → transcript → video flow and exposes
//! the shared state that the UI reads every frame.
//!
//! # Architecture
//!
//! ```text
//! SessionCommand (mpsc)
//!        │
//!        ▼
//! SessionOrchestrator::run()          ← async tokio task
//!        │
//!        ├─ Submit(WishRequest)
//!        │     ├─ TranscriptGenerator::generate (awaited)
//!        │     │     ├─ Err → error_message, stay Input
//!        │     │     └─ Ok  → Result phase
//!        │     ├─ tokio::spawn(video task)       ← fire-and-forget
//!        │     └─ tokio::spawn(carousel ticker)  ← 4 s rotation
//!        │
//!        └─ Reset → back to Input, epoch bump disarms the ticker
//!
//! SharedState (Arc<Mutex<SessionState>>) ←── read by egui update() each frame
//! ```

pub mod carousel;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use carousel::run_carousel;
pub use runner::{SessionCommand, SessionOrchestrator};
pub use state::{new_shared_state, Phase, SessionState, SharedState, TranscriptResult, VideoResult};
