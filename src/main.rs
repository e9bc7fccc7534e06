//! Application entry point — Santa Wishing Machine.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the service clients from config.
//! 5. Create the session command channel and the shared state.
//! 6. Spawn the session orchestrator on the tokio runtime.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use santa_wishing_machine::{
    api::{ApiTranscriptGenerator, ApiVideoGenerator, TranscriptGenerator, VideoGenerator},
    app::SantaApp,
    config::AppConfig,
    session::{new_shared_state, SessionCommand, SessionOrchestrator},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([width, height])
        .with_min_inner_size([400.0, 480.0]);

    if let Some((x, y)) = config.ui.window_position {
        vp = vp.with_position(egui::pos2(x, y));
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Santa Wishing Machine starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (transcript + video requests each take a worker)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Service clients
    let transcript: Arc<dyn TranscriptGenerator> =
        Arc::new(ApiTranscriptGenerator::from_config(&config.api));
    let video: Arc<dyn VideoGenerator> = Arc::new(ApiVideoGenerator::from_config(&config.api));
    log::info!("Backend: {}", config.api.base_url);

    // 5. Channel + shared state
    let (command_tx, command_rx) = mpsc::channel::<SessionCommand>(16);
    let state = new_shared_state();

    // 6. Spawn the session orchestrator onto the tokio runtime
    {
        let orchestrator = SessionOrchestrator::new(
            Arc::clone(&state),
            transcript,
            video,
            Duration::from_millis(config.carousel.period_ms),
            config.carousel.images.len(),
        );
        rt.spawn(orchestrator.run(command_rx));
    }

    // 7. Build the egui app and run it (blocks until the window is closed)
    let app = SantaApp::new(command_tx, state, config.clone());
    let options = native_options(&config);

    eframe::run_native(
        "Santa Wishing Machine",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
