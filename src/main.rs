//! Application entry point — EchoVerse.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the synthesis engine ([`GoogleTtsEngine`]) and the share
//!    publisher ([`FileIoUploader`] + [`SharePublisher`]) from config.
//! 5. Create pipeline channels (`command`, `event`).
//! 6. Spawn the pipeline orchestrator on the tokio runtime.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;

use echoverse::{
    app::EchoVerseApp,
    config::AppConfig,
    pipeline::{PipelineCommand, PipelineEvent, PipelineOrchestrator},
    share::{FileIoUploader, SharePublisher, ShareUploader},
    tts::{GoogleTtsEngine, TtsEngine},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let mut vp = egui::ViewportBuilder::default()
        .with_inner_size([780.0, 640.0])
        .with_min_inner_size([520.0, 420.0])
        .with_title("EchoVerse");

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
    log::info!("EchoVerse starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (2 worker threads — synthesis + publish each take one)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Synthesis engine and share publisher
    let tts: Arc<dyn TtsEngine> = Arc::new(GoogleTtsEngine::from_config(&config.tts));
    let uploader: Arc<dyn ShareUploader> = Arc::new(FileIoUploader::from_config(&config.share));

    let output_dir = config.output.resolve_dir();
    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        log::warn!(
            "Could not create output directory {}: {e}",
            output_dir.display()
        );
    }
    let publisher = SharePublisher::new(uploader, output_dir);

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(16);
    let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>(32);

    // 6. Spawn pipeline orchestrator onto the tokio runtime
    let orchestrator = PipelineOrchestrator::new(Arc::clone(&tts), publisher);
    rt.spawn(orchestrator.run(command_rx, event_tx));

    // 7. Build the egui app and run it (blocks until the window is closed)
    let app = EchoVerseApp::new(command_tx, event_rx, config.clone());
    let options = native_options(&config);

    eframe::run_native("EchoVerse", options, Box::new(move |_cc| Ok(Box::new(app))))
}
