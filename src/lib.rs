//! EchoVerse — free audiobook generator.
//!
//! Turns user-supplied text into narrated MP3 audio via the Google Translate
//! TTS endpoint, saves the narration locally, and best-effort publishes a
//! shareable link (file.io) rendered as a QR code.
//!
//! # Architecture
//!
//! ```text
//! egui UI thread (app)                tokio task (pipeline)
//! ┌──────────────────┐  GenerateCommand  ┌────────────────────────┐
//! │ EchoVerseApp     │ ────────────────▶ │ PipelineOrchestrator   │
//! │  Page dispatch   │                   │  validate              │
//! │  phase panels    │ ◀──────────────── │  TtsEngine.synthesize  │
//! │  playback / QR   │   PipelineEvent   │  SharePublisher.publish│
//! └──────────────────┘                   └────────────────────────┘
//! ```
//!
//! * `narration` — request model: languages, tones, tag prepending, validation.
//! * `tts`       — `TtsEngine` trait + Google Translate TTS client.
//! * `share`     — narration file write, file.io upload, QR rendering.
//! * `pipeline`  — generation state machine and orchestrator.
//! * `playback`  — inline MP3 playback via rodio.
//! * `config`    — TOML settings and platform paths.

pub mod app;
pub mod config;
pub mod narration;
pub mod pipeline;
pub mod playback;
pub mod share;
pub mod tts;
