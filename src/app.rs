//! Santa Wishing Machine — egui/eframe application.
//!
//! # Architecture
//!
//! [`SantaApp`] is the top-level [`eframe::App`].  It owns the raw form
//! field text and two handles into the session layer:
//!
//! * `command_tx` — sends [`SessionCommand`] to the session orchestrator.
//! * `state`      — [`SharedState`] snapshot read at the start of each frame.
//!
//! # Views
//!
//! | Phase | Visual |
//! |-------|--------|
//! | `Input` | Child-details form, inline error text, submit button |
//! | `Result` | Transcript overlay + video link / spinner / placeholder carousel, reset button |

use eframe::egui;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::form::WishForm;
use crate::session::{Phase, SessionCommand, SessionState, SharedState};

// ---------------------------------------------------------------------------
// SantaApp
// ---------------------------------------------------------------------------

/// eframe application — the wishing-machine window.
pub struct SantaApp {
    // ── Form fields (retained across submissions and resets) ─────────────
    name: String,
    nice_items: String,
    naughty_items: String,
    gift_wishes: String,

    /// Local validation message; shown inline, never sent anywhere.
    form_error: Option<String>,

    // ── UI state ─────────────────────────────────────────────────────────
    /// Spinner animation phase (increases each frame).
    spinner_phase: f32,

    // ── Session handles ──────────────────────────────────────────────────
    /// Send commands to the background session orchestrator.
    pub command_tx: mpsc::Sender<SessionCommand>,
    /// Shared session state, mutated by the orchestrator and its tasks.
    pub state: SharedState,

    // ── Configuration ────────────────────────────────────────────────────
    /// Application configuration (read-only after startup).
    pub config: AppConfig,
}

impl SantaApp {
    /// Create a new [`SantaApp`].
    ///
    /// * `command_tx` — sender end of the session command channel.
    /// * `state`      — shared session state.
    /// * `config`     — loaded application configuration.
    pub fn new(
        command_tx: mpsc::Sender<SessionCommand>,
        state: SharedState,
        config: AppConfig,
    ) -> Self {
        Self {
            name: String::new(),
            nice_items: String::new(),
            naughty_items: String::new(),
            gift_wishes: String::new(),
            form_error: None,
            spinner_phase: 0.0,
            command_tx,
            state,
            config,
        }
    }

    // ── Chrome ───────────────────────────────────────────────────────────

    /// Header: title plus the static status line.
    fn draw_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(
                egui::RichText::new("Santa Wishing Machine")
                    .color(egui::Color32::from_rgb(200, 60, 60))
                    .size(24.0),
            );
        });
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("●").color(egui::Color32::from_rgb(80, 200, 120)));
            ui.label(egui::RichText::new("Connected").size(11.0));
            ui.separator();
            ui.label(egui::RichText::new("Voice: Santa").size(11.0));
            ui.separator();
            ui.label(egui::RichText::new("Persona: Jolly").size(11.0));
        });
    }

    /// Footer: the Santa-tracker link.
    fn draw_footer(&self, ui: &mut egui::Ui) {
        ui.separator();
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Want to see where Santa is right now?").size(11.0));
            ui.hyperlink_to(
                egui::RichText::new("Check the Santa Tracker!").size(11.0),
                "https://santatracker.google.com/",
            );
        });
    }

    // ── Input view ───────────────────────────────────────────────────────

    /// Render the child-details form.
    fn draw_input(&mut self, ui: &mut egui::Ui, snapshot: &SessionState) {
        ui.add_space(6.0);
        ui.heading(egui::RichText::new("Child's Details").size(16.0));
        ui.add_space(4.0);

        // Session error (failed submission) takes precedence over a local
        // validation message.
        let error = snapshot
            .error_message
            .as_deref()
            .or(self.form_error.as_deref());
        if let Some(msg) = error {
            ui.label(
                egui::RichText::new(msg)
                    .color(egui::Color32::from_rgb(255, 100, 100))
                    .size(12.0),
            );
            ui.add_space(4.0);
        }

        ui.label("Child's Name");
        ui.add(
            egui::TextEdit::singleline(&mut self.name)
                .hint_text("Enter child's name")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        ui.label("Nice Things Done");
        ui.add(
            egui::TextEdit::multiline(&mut self.nice_items)
                .hint_text("What good things did they do?")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        ui.label("Naughty Things Done");
        ui.add(
            egui::TextEdit::multiline(&mut self.naughty_items)
                .hint_text("Any naughty things?")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(4.0);

        ui.label("Gift Wishes");
        ui.add(
            egui::TextEdit::multiline(&mut self.gift_wishes)
                .hint_text("What would they like for Christmas?")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        let label = if snapshot.transcript_loading {
            format!("{} Consulting Santa...", self.spinner_char())
        } else {
            "Generate Video Transcript".to_string()
        };

        let button = egui::Button::new(egui::RichText::new(label).size(14.0));
        if ui
            .add_enabled(!snapshot.transcript_loading, button)
            .clicked()
        {
            self.submit();
        }
    }

    /// Validate the form and dispatch a submission.
    ///
    /// Invalid input never leaves this method: no command is sent and no
    /// session state changes, only the inline message.
    fn submit(&mut self) {
        self.form_error = None;

        match WishForm::validate(
            &self.name,
            &self.nice_items,
            &self.naughty_items,
            &self.gift_wishes,
        ) {
            Ok(request) => {
                if let Err(e) = self.command_tx.try_send(SessionCommand::Submit(request)) {
                    log::error!("failed to dispatch submission: {e}");
                }
            }
            Err(e) => {
                self.form_error = Some(e.to_string());
            }
        }
    }

    // ── Result view ──────────────────────────────────────────────────────

    /// Render the transcript over the visual panel, plus the reset button.
    fn draw_result(&mut self, ui: &mut egui::Ui, snapshot: &SessionState) {
        ui.add_space(6.0);

        // Visual area: exactly one of video / spinner / placeholder carousel.
        if let Some(media) = &snapshot.media {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Your video from the North Pole is ready!")
                        .color(egui::Color32::from_rgb(80, 200, 120))
                        .size(14.0),
                );
                ui.hyperlink(&media.media_uri);
            });
        } else if snapshot.video_loading {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(
                    egui::RichText::new(format!(
                        "{} Generating magical video from the North Pole... \
                         (this may take a minute)",
                        self.spinner_char()
                    ))
                    .color(egui::Color32::from_rgb(68, 136, 255))
                    .size(13.0),
                );
                ui.add_space(24.0);
            });
        } else {
            self.draw_carousel(ui, snapshot.carousel_index);
        }

        // Transcript overlay.
        if let Some(transcript) = &snapshot.transcript {
            ui.add_space(8.0);
            egui::Frame::new()
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 20, 200))
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(transcript.text.as_str())
                                .color(egui::Color32::from_rgb(230, 230, 230))
                                .size(13.0),
                        );
                    });
                });
        }

        ui.add_space(8.0);
        if ui
            .add(egui::Button::new(
                egui::RichText::new("Create Another Message").size(13.0),
            ))
            .clicked()
        {
            if let Err(e) = self.command_tx.try_send(SessionCommand::Reset) {
                log::error!("failed to dispatch reset: {e}");
            }
        }
    }

    /// Draw the placeholder slot for the current carousel image.
    ///
    /// Placeholder art is painted rather than loaded from disk; the image
    /// name from config is shown as a caption so the rotation is visible.
    fn draw_carousel(&self, ui: &mut egui::Ui, index: usize) {
        let palette = [
            egui::Color32::from_rgb(140, 30, 30),
            egui::Color32::from_rgb(30, 90, 40),
            egui::Color32::from_rgb(30, 50, 110),
        ];

        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 180.0),
            egui::Sense::hover(),
        );
        ui.painter().rect_filled(
            rect,
            egui::CornerRadius::same(6),
            palette[index % palette.len()],
        );

        let caption = self
            .config
            .carousel
            .images
            .get(index)
            .map(String::as_str)
            .unwrap_or("santa");
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            caption,
            egui::FontId::proportional(14.0),
            egui::Color32::from_rgb(230, 230, 230),
        );
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    /// A simple rotating ASCII spinner character driven by `spinner_phase`.
    fn spinner_char(&self) -> char {
        let chars = ['|', '/', '-', '\\'];
        let idx = (self.spinner_phase as usize) % chars.len();
        chars[idx]
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for SantaApp {
    /// Called every frame by eframe.  Snapshots the session state, advances
    /// the spinner, then renders the active view.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Snapshot session state under a short lock ---------------------
        let snapshot = self.state.lock().unwrap().clone();

        // --- Advance spinner animation -------------------------------------
        self.spinner_phase += 0.08;
        if self.spinner_phase >= 4.0 {
            self.spinner_phase = 0.0;
        }

        // --- Schedule repaints while something is in motion ---------------
        if snapshot.transcript_loading || snapshot.video_loading {
            // ~15 fps for the spinner
            ctx.request_repaint_after(Duration::from_millis(66));
        } else if snapshot.carousel_active() {
            // Poll often enough to pick up the next rotation promptly
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui);
            ui.separator();

            match snapshot.phase {
                Phase::Input => self.draw_input(ui, &snapshot),
                Phase::Result => self.draw_result(ui, &snapshot),
            }

            self.draw_footer(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("Santa Wishing Machine closing");
    }
}
