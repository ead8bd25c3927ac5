//! EchoVerse — egui/eframe application.
//!
//! # Architecture
//!
//! [`EchoVerseApp`] is the top-level [`eframe::App`].  It owns the UI state
//! and two channel endpoints:
//!
//! * `command_tx` — sends [`PipelineCommand`] to the pipeline orchestrator.
//! * `event_rx`  — receives [`PipelineEvent`] progress from the orchestrator.
//!
//! Navigation is an explicit [`Page`] value matched once per frame in
//! `update()` — there is no ambient page state anywhere else.
//!
//! # Generator panels
//!
//! | Phase | Visual |
//! |-------|--------|
//! | `Idle` | input widgets + Generate button |
//! | `Validating` / `Synthesizing` / `Publishing` | spinner + phase label |
//! | `SynthesisFailed` | error message — red |
//! | `Published` | player + saved path + share link + QR image |
//! | `PublishFailed` | player + saved path + "no share link" notice |

use std::path::PathBuf;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::narration::{Language, NarrationRequest, Tone};
use crate::pipeline::{GenerationPhase, PipelineCommand, PipelineEvent};
use crate::playback::AudioPlayer;

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Which screen is rendered.  Routed through a single dispatch in
/// [`EchoVerseApp::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Landing screen with the feature blurb.
    Welcome,
    /// The audiobook generator.
    Generator,
}

// ---------------------------------------------------------------------------
// EchoVerseApp
// ---------------------------------------------------------------------------

/// eframe application — the EchoVerse audiobook generator window.
pub struct EchoVerseApp {
    // ── Navigation ───────────────────────────────────────────────────────
    page: Page,

    // ── Inputs ───────────────────────────────────────────────────────────
    /// Text to narrate (typed or loaded from a dropped .txt file).
    input_text: String,
    language: Language,
    tone: Tone,
    dark_mode: bool,

    // ── Generation state (reset on every Generate press) ─────────────────
    phase: GenerationPhase,
    /// The synthesized MP3, once available.
    audio: Option<Vec<u8>>,
    /// Where the narration was written locally.
    saved_path: Option<PathBuf>,
    /// Public share link, when publishing succeeded.
    share_url: Option<String>,
    /// Uploaded QR image for `share_url`.
    qr_texture: Option<egui::TextureHandle>,
    /// Validation warning (empty input).
    warning: Option<String>,
    /// Synthesis failure message, reported verbatim.
    error: Option<String>,

    // ── Playback ─────────────────────────────────────────────────────────
    /// `None` when no audio output device is available.
    player: Option<AudioPlayer>,

    // ── Channels ─────────────────────────────────────────────────────────
    command_tx: mpsc::Sender<PipelineCommand>,
    event_rx: mpsc::Receiver<PipelineEvent>,

    // ── Configuration ────────────────────────────────────────────────────
    config: AppConfig,
}

impl EchoVerseApp {
    /// Create a new [`EchoVerseApp`].
    ///
    /// * `command_tx` — sender end of the pipeline command channel.
    /// * `event_rx`   — receiver end of the pipeline event channel.
    /// * `config`     — loaded application configuration.
    pub fn new(
        command_tx: mpsc::Sender<PipelineCommand>,
        event_rx: mpsc::Receiver<PipelineEvent>,
        config: AppConfig,
    ) -> Self {
        let player = match AudioPlayer::try_new() {
            Ok(player) => Some(player),
            Err(e) => {
                log::warn!("playback disabled: {e}");
                None
            }
        };

        Self {
            page: Page::Welcome,
            input_text: String::new(),
            language: Language::default(),
            tone: Tone::default(),
            dark_mode: config.ui.dark_mode,
            phase: GenerationPhase::Idle,
            audio: None,
            saved_path: None,
            share_url: None,
            qr_texture: None,
            warning: None,
            error: None,
            player,
            command_tx,
            event_rx,
            config,
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending pipeline events (non-blocking).
    fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                PipelineEvent::ValidationFailed { message } => {
                    self.warning = Some(message);
                    self.phase = GenerationPhase::Idle;
                }
                PipelineEvent::SynthesisStarted => {
                    self.phase = GenerationPhase::Synthesizing;
                }
                PipelineEvent::SynthesisFailed { message } => {
                    self.error = Some(message);
                    self.phase = GenerationPhase::SynthesisFailed;
                }
                PipelineEvent::SynthesisComplete { audio } => {
                    self.audio = Some(audio);
                    self.phase = GenerationPhase::Synthesized;
                }
                PipelineEvent::PublishStarted => {
                    self.phase = GenerationPhase::Publishing;
                }
                PipelineEvent::Published {
                    saved_path,
                    url,
                    qr_png,
                } => {
                    self.saved_path = saved_path;
                    self.qr_texture = qr_png.and_then(|png| load_qr_texture(ctx, &png));
                    self.share_url = Some(url);
                    self.phase = GenerationPhase::Published;
                }
                PipelineEvent::PublishFailed { saved_path } => {
                    self.saved_path = saved_path;
                    self.phase = GenerationPhase::PublishFailed;
                }
            }
        }
    }

    /// Load a dropped `.txt` file into the text input.
    fn poll_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            let is_txt = file
                .path
                .as_deref()
                .and_then(|p| p.extension())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
                || file.name.to_ascii_lowercase().ends_with(".txt");
            if !is_txt {
                continue;
            }

            let content = match (&file.path, &file.bytes) {
                (Some(path), _) => std::fs::read_to_string(path).ok(),
                (None, Some(bytes)) => String::from_utf8(bytes.to_vec()).ok(),
                _ => None,
            };

            match content {
                Some(text) => {
                    log::info!("loaded {} chars from dropped file", text.chars().count());
                    self.input_text = text;
                }
                None => {
                    self.warning = Some("Dropped file is not readable UTF-8 text.".into());
                }
            }
        }
    }

    // ── Generation ───────────────────────────────────────────────────────

    /// Reset per-generation state and hand the request to the pipeline.
    fn start_generation(&mut self) {
        if self.phase.is_busy() {
            return;
        }

        if let Some(player) = &self.player {
            player.stop();
        }
        self.audio = None;
        self.saved_path = None;
        self.share_url = None;
        self.qr_texture = None;
        self.warning = None;
        self.error = None;
        self.phase = GenerationPhase::Validating;

        let request = NarrationRequest::new(self.input_text.clone(), self.language, self.tone);
        if self
            .command_tx
            .try_send(PipelineCommand::Generate { request })
            .is_err()
        {
            // Channel full or orchestrator gone — should not happen with one
            // in-flight generation, but never leave the UI stuck busy.
            log::error!("could not hand generation to the pipeline");
            self.error = Some("Internal error: generation pipeline unavailable.".into());
            self.phase = GenerationPhase::SynthesisFailed;
        }
    }

    /// Write another copy of the current narration to the output directory.
    fn save_copy(&mut self) {
        let Some(audio) = &self.audio else {
            return;
        };

        let dir = self.config.output.resolve_dir();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            log::warn!("could not create output directory {}: {e}", dir.display());
        }
        let path = dir.join(crate::share::narration_file_name());
        match std::fs::write(&path, audio) {
            Ok(()) => {
                log::info!("narration copy saved to {}", path.display());
                self.saved_path = Some(path);
            }
            Err(e) => {
                log::warn!("could not save narration copy: {e}");
                self.warning = Some("Could not save a copy of the narration.".into());
            }
        }
    }

    // ── Welcome page ─────────────────────────────────────────────────────

    fn draw_welcome(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading(egui::RichText::new("Welcome to EchoVerse").size(28.0));
            ui.add_space(8.0);
            ui.separator();
        });

        ui.add_space(12.0);
        ui.heading("How it works");
        ui.label("1. Enter your text, or drop a .txt file onto the window");
        ui.label("2. Choose a language and tone");
        ui.label("3. Generate and preview your audiobook");
        ui.label("4. Play it back, keep the MP3, or share the QR code");

        ui.add_space(12.0);
        ui.heading("Features");
        ui.label("• Free text-to-speech narration");
        ui.label("• Multiple languages supported");
        ui.label("• QR code sharing");
        ui.label("• Dark mode");

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            if ui
                .add(egui::Button::new(
                    egui::RichText::new("Start Creating").size(16.0),
                ))
                .clicked()
            {
                self.page = Page::Generator;
            }
        });
    }

    // ── Generator page ───────────────────────────────────────────────────

    fn draw_generator(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.heading("EchoVerse — Audiobook Generator");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.toggle_value(&mut self.dark_mode, "🌙 Dark");
            });
        });
        ui.separator();

        // ── Text input ───────────────────────────────────────────────────
        ui.label(egui::RichText::new("Text").strong());
        ui.add(
            egui::TextEdit::multiline(&mut self.input_text)
                .desired_rows(8)
                .desired_width(f32::INFINITY)
                .hint_text("Paste your text here, or drop a .txt file onto the window"),
        );

        ui.add_space(6.0);

        // ── Language / tone selectors ────────────────────────────────────
        ui.horizontal(|ui| {
            egui::ComboBox::from_label("Language")
                .selected_text(self.language.label())
                .show_ui(ui, |ui| {
                    for language in Language::ALL {
                        ui.selectable_value(&mut self.language, language, language.label());
                    }
                });

            ui.add_space(16.0);

            egui::ComboBox::from_label("Tone")
                .selected_text(self.tone.label())
                .show_ui(ui, |ui| {
                    for tone in Tone::ALL {
                        ui.selectable_value(&mut self.tone, tone, tone.label());
                    }
                });
        });

        ui.add_space(10.0);

        // ── Generate ─────────────────────────────────────────────────────
        let busy = self.phase.is_busy();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    !busy,
                    egui::Button::new(egui::RichText::new("Generate Audiobook").size(15.0)),
                )
                .clicked()
            {
                self.start_generation();
            }

            if busy {
                ui.spinner();
                ui.label(self.phase.label());
            }
        });

        // ── Notices ──────────────────────────────────────────────────────
        if let Some(warning) = &self.warning {
            ui.add_space(4.0);
            ui.colored_label(egui::Color32::from_rgb(230, 180, 60), warning);
        }
        if let Some(error) = &self.error {
            ui.add_space(4.0);
            ui.colored_label(
                egui::Color32::from_rgb(230, 90, 90),
                format!("Audio generation failed: {error}"),
            );
        }

        // ── Result ───────────────────────────────────────────────────────
        if self.audio.is_some() {
            ui.add_space(10.0);
            ui.separator();
            self.draw_result(ui, ctx);
        }
    }

    /// Preview, download, and share section — rendered once audio exists.
    fn draw_result(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(egui::RichText::new("Preview & Download").strong());
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            match &mut self.player {
                Some(player) => {
                    if ui.button("▶ Play").clicked() {
                        if let Some(audio) = &self.audio {
                            if let Err(e) = player.play(audio.clone()) {
                                log::warn!("playback failed: {e}");
                            }
                        }
                    }
                    if ui.button("⏹ Stop").clicked() {
                        player.stop();
                    }
                }
                None => {
                    ui.weak("(no audio output device — playback disabled)");
                }
            }
        });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            match &self.saved_path {
                Some(path) => {
                    ui.label(format!("Saved to {}", path.display()));
                    if ui.small_button("Copy path").clicked() {
                        ctx.copy_text(path.display().to_string());
                    }
                }
                None => {
                    ui.weak("(not saved yet)");
                }
            }
            if ui.small_button("Save a copy").clicked() {
                self.save_copy();
            }
        });

        // ── Share link ───────────────────────────────────────────────────
        match self.phase {
            GenerationPhase::Published => {
                if let Some(url) = self.share_url.clone() {
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new("Share").strong());
                    ui.horizontal(|ui| {
                        ui.hyperlink_to(url.as_str(), url.as_str());
                        if ui.small_button("Copy link").clicked() {
                            ctx.copy_text(url);
                        }
                    });
                    if let Some(texture) = &self.qr_texture {
                        ui.add_space(4.0);
                        ui.image(texture);
                        ui.weak("Scan to listen on mobile");
                    }
                }
            }
            GenerationPhase::PublishFailed => {
                ui.add_space(8.0);
                // Informational, not an error: the narration itself succeeded.
                ui.colored_label(
                    egui::Color32::from_rgb(110, 160, 230),
                    "Could not create shareable link.",
                );
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// QR texture loading
// ---------------------------------------------------------------------------

/// Decode a QR PNG into an egui texture.
fn load_qr_texture(ctx: &egui::Context, png: &[u8]) -> Option<egui::TextureHandle> {
    let img = match image::load_from_memory(png) {
        Ok(img) => img.to_rgba8(),
        Err(e) => {
            log::warn!("could not decode QR image: {e}");
            return None;
        }
    };
    let size = [img.width() as usize, img.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
    Some(ctx.load_texture("share-qr", color_image, egui::TextureOptions::NEAREST))
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for EchoVerseApp {
    /// Called every frame by eframe.  Polls channels, then renders the
    /// current page.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events(ctx);
        self.poll_dropped_files(ctx);

        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // Keep polling while a generation is in flight.
        if self.phase.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                // Single page dispatch — the only place `page` is matched.
                match self.page {
                    Page::Welcome => self.draw_welcome(ui),
                    Page::Generator => self.draw_generator(ui, ctx),
                }
            });
        });
    }

    /// Persist UI preferences on exit (best-effort).
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.ui.dark_mode = self.dark_mode;
        if let Err(e) = self.config.save() {
            log::warn!("could not save settings: {e}");
        }
        log::info!("EchoVerse closing");
    }
}
