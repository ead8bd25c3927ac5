//! Pipeline orchestrator — drives the full validate → synthesize → publish loop.
//!
//! [`PipelineOrchestrator`] runs inside the tokio runtime, listens for
//! [`PipelineCommand`]s from the UI, and emits [`PipelineEvent`]s back.
//!
//! # Pipeline flow
//!
//! ```text
//! PipelineCommand::Generate { request }
//!   └─▶ request.validate()
//!         ├─ Err → ValidationFailed (warning, zero external calls)
//!         └─ Ok  → tts.synthesize(tagged_text, synthesis_code)   [unbounded]
//!               ├─ Err → SynthesisFailed (verbatim message, no upload)
//!               └─ Ok  → SynthesisComplete { audio }
//!                        publisher.publish(audio)                [30 s timeout]
//!                          ├─ link    → Published
//!                          └─ no link → PublishFailed (info, audio kept)
//! ```
//!
//! Commands are processed one at a time, start to finish — there is no
//! cancellation of an in-flight generation and no result caching across
//! generations.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::narration::NarrationRequest;
use crate::share::SharePublisher;
use crate::tts::TtsEngine;

// ---------------------------------------------------------------------------
// Pipeline message types
// ---------------------------------------------------------------------------

/// Commands sent from the UI thread to the pipeline orchestrator.
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Run one full generation for `request`.
    Generate { request: NarrationRequest },
}

/// Results / progress events delivered from the pipeline to the UI.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// The request failed its pre-condition check; nothing was called.
    /// Rendered as a warning, not an error.
    ValidationFailed { message: String },

    /// Validation passed; the synthesis backend has been invoked.
    SynthesisStarted,

    /// Synthesis failed — the generation is over, no upload is attempted.
    /// `message` is the backend error, reported verbatim.
    SynthesisFailed { message: String },

    /// The complete MP3 byte stream is ready.
    SynthesisComplete { audio: Vec<u8> },

    /// The narration file is being written and uploaded.
    PublishStarted,

    /// Upload succeeded.
    Published {
        saved_path: Option<std::path::PathBuf>,
        url: String,
        qr_png: Option<Vec<u8>>,
    },

    /// Upload failed or was rejected — informational, the audio stands.
    PublishFailed {
        saved_path: Option<std::path::PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives the complete text-to-audiobook pipeline.
///
/// Create with [`PipelineOrchestrator::new`], then call [`run`](Self::run)
/// inside a tokio task.
pub struct PipelineOrchestrator {
    tts: Arc<dyn TtsEngine>,
    publisher: SharePublisher,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator.
    ///
    /// * `tts`       — synthesis backend (e.g. `GoogleTtsEngine`).
    /// * `publisher` — best-effort share publisher (file write + upload + QR).
    pub fn new(tts: Arc<dyn TtsEngine>, publisher: SharePublisher) -> Self {
        Self { tts, publisher }
    }

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// This is an `async fn` and should be spawned as a tokio task from
    /// `main()`.  It never returns while the channel is open.
    pub async fn run(
        self,
        mut command_rx: mpsc::Receiver<PipelineCommand>,
        event_tx: mpsc::Sender<PipelineEvent>,
    ) {
        while let Some(command) = command_rx.recv().await {
            match command {
                PipelineCommand::Generate { request } => {
                    self.handle_generate(request, &event_tx).await;
                }
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    /// Handle one generation command, start to finish.
    async fn handle_generate(
        &self,
        request: NarrationRequest,
        event_tx: &mpsc::Sender<PipelineEvent>,
    ) {
        // ── 1. Validate (pre-condition, zero external calls) ─────────────
        if let Err(e) = request.validate() {
            log::warn!("pipeline: validation failed: {e}");
            let _ = event_tx
                .send(PipelineEvent::ValidationFailed {
                    message: e.to_string(),
                })
                .await;
            return;
        }

        // ── 2. Synthesis (unbounded wait, no retry) ──────────────────────
        let _ = event_tx.send(PipelineEvent::SynthesisStarted).await;

        let tagged = request.tagged_text();
        let lang = request.language.synthesis_code();

        log::debug!(
            "pipeline: synthesizing {} chars, lang={lang}, tone={}",
            tagged.chars().count(),
            request.tone
        );

        let audio = match self.tts.synthesize(&tagged, lang).await {
            Ok(audio) => audio,
            Err(e) => {
                log::error!("pipeline: synthesis failed: {e}");
                let _ = event_tx
                    .send(PipelineEvent::SynthesisFailed {
                        message: e.to_string(),
                    })
                    .await;
                return;
            }
        };

        let _ = event_tx
            .send(PipelineEvent::SynthesisComplete {
                audio: audio.clone(),
            })
            .await;

        // ── 3. Publish (best-effort side channel) ────────────────────────
        let _ = event_tx.send(PipelineEvent::PublishStarted).await;

        let outcome = self.publisher.publish(&audio).await;

        let event = match outcome.link {
            Some(link) => PipelineEvent::Published {
                saved_path: outcome.saved_path,
                url: link.url,
                qr_png: link.qr_png,
            },
            None => PipelineEvent::PublishFailed {
                saved_path: outcome.saved_path,
            },
        };
        let _ = event_tx.send(event).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::{Language, Tone};
    use crate::share::{make_qr_png, ShareError, ShareUploader};
    use crate::tts::{MockTtsEngine, TtsError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Mock uploader that always succeeds with a fixed URL; counts calls.
    struct OkUploader {
        url: String,
        calls: AtomicUsize,
    }

    impl OkUploader {
        fn new(url: impl Into<String>) -> Self {
            Self {
                url: url.into(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ShareUploader for OkUploader {
        async fn upload(&self, _name: &str, _bytes: Vec<u8>) -> Result<String, ShareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.url.clone())
        }
    }

    /// Mock uploader that always fails; counts calls.
    struct FailUploader {
        calls: AtomicUsize,
    }

    impl FailUploader {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ShareUploader for FailUploader {
        async fn upload(&self, _name: &str, _bytes: Vec<u8>) -> Result<String, ShareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ShareError::Rejected("success flag not set".into()))
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn request(text: &str) -> NarrationRequest {
        NarrationRequest::new(text, Language::EnglishUk, Tone::Dramatic)
    }

    /// Run the orchestrator over `commands` and collect every emitted event.
    async fn run_pipeline(
        tts: Arc<MockTtsEngine>,
        uploader: Arc<dyn ShareUploader>,
        commands: Vec<PipelineCommand>,
    ) -> Vec<PipelineEvent> {
        let dir = tempfile::tempdir().expect("temp dir");
        let publisher = SharePublisher::new(uploader, dir.path().to_path_buf());
        let orchestrator = PipelineOrchestrator::new(tts, publisher);

        let (command_tx, command_rx) = mpsc::channel(4);
        let (event_tx, mut event_rx) = mpsc::channel(32);

        for command in commands {
            command_tx.send(command).await.unwrap();
        }
        drop(command_tx); // close channel so run() returns

        orchestrator.run(command_rx, event_tx).await;

        let mut events = Vec::new();
        while let Ok(event) = event_rx.try_recv() {
            events.push(event);
        }
        events
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    /// Empty / whitespace input must short-circuit with a warning and never
    /// touch either external service.
    #[tokio::test]
    async fn empty_text_never_calls_the_backend() {
        let tts = Arc::new(MockTtsEngine::ok(vec![1u8]));
        let uploader = Arc::new(OkUploader::new("https://file.io/abc123"));

        let events = run_pipeline(
            Arc::clone(&tts),
            Arc::clone(&uploader) as Arc<dyn ShareUploader>,
            vec![PipelineCommand::Generate {
                request: request("  \n\t "),
            }],
        )
        .await;

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], PipelineEvent::ValidationFailed { .. }));
        assert_eq!(tts.call_count(), 0);
        assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
    }

    /// The backend must receive the tagged text and the region-stripped
    /// language code.
    #[tokio::test]
    async fn backend_receives_tagged_text_and_stripped_language() {
        let tts = Arc::new(MockTtsEngine::ok(vec![1u8, 2, 3]));
        let uploader: Arc<dyn ShareUploader> = Arc::new(OkUploader::new("https://file.io/abc123"));

        run_pipeline(
            Arc::clone(&tts),
            uploader,
            vec![PipelineCommand::Generate {
                request: request("Once upon a time."),
            }],
        )
        .await;

        let (text, lang) = tts.last_input().expect("engine was called");
        assert_eq!(text, "[Dramatic Version] Once upon a time.");
        // English (UK) is "en-uk" in the UI but "en" on the wire.
        assert_eq!(lang, "en");
    }

    /// A synthesis failure surfaces its message verbatim and never reaches
    /// the uploader.
    #[tokio::test]
    async fn synthesis_failure_aborts_before_upload() {
        let tts = Arc::new(MockTtsEngine::err(TtsError::Request(
            "connection refused".into(),
        )));
        let uploader = Arc::new(FailUploader::new());

        let events = run_pipeline(
            Arc::clone(&tts),
            Arc::clone(&uploader) as Arc<dyn ShareUploader>,
            vec![PipelineCommand::Generate {
                request: request("hello"),
            }],
        )
        .await;

        let failure = events
            .iter()
            .find_map(|e| match e {
                PipelineEvent::SynthesisFailed { message } => Some(message.clone()),
                _ => None,
            })
            .expect("SynthesisFailed expected");
        assert!(failure.contains("connection refused"));

        assert_eq!(uploader.calls.load(Ordering::SeqCst), 0);
        assert!(!events
            .iter()
            .any(|e| matches!(e, PipelineEvent::PublishStarted)));
    }

    /// Happy path: audio event, then a Published event whose QR encodes
    /// exactly the returned URL.
    #[tokio::test]
    async fn successful_generation_publishes_with_qr() {
        let tts = Arc::new(MockTtsEngine::ok(vec![0xFF, 0xFB, 0x90]));
        let uploader: Arc<dyn ShareUploader> = Arc::new(OkUploader::new("https://file.io/abc123"));

        let events = run_pipeline(
            Arc::clone(&tts),
            uploader,
            vec![PipelineCommand::Generate {
                request: request("hello"),
            }],
        )
        .await;

        let audio = events
            .iter()
            .find_map(|e| match e {
                PipelineEvent::SynthesisComplete { audio } => Some(audio.clone()),
                _ => None,
            })
            .expect("SynthesisComplete expected");
        assert_eq!(audio, vec![0xFF, 0xFB, 0x90]);

        match events.last().expect("events expected") {
            PipelineEvent::Published {
                url,
                qr_png,
                saved_path,
            } => {
                assert_eq!(url, "https://file.io/abc123");
                assert_eq!(
                    qr_png.as_deref(),
                    Some(make_qr_png("https://file.io/abc123").unwrap().as_slice())
                );
                assert!(saved_path.is_some());
            }
            other => panic!("expected Published, got {other:?}"),
        }
    }

    /// A failed upload degrades to PublishFailed; the audio was already
    /// delivered and the local file written.
    #[tokio::test]
    async fn publish_failure_degrades_gracefully() {
        let tts = Arc::new(MockTtsEngine::ok(vec![1u8, 2, 3]));
        let uploader = Arc::new(FailUploader::new());

        let events = run_pipeline(
            Arc::clone(&tts),
            Arc::clone(&uploader) as Arc<dyn ShareUploader>,
            vec![PipelineCommand::Generate {
                request: request("hello"),
            }],
        )
        .await;

        assert!(events
            .iter()
            .any(|e| matches!(e, PipelineEvent::SynthesisComplete { .. })));

        match events.last().expect("events expected") {
            PipelineEvent::PublishFailed { saved_path } => {
                assert!(saved_path.is_some());
            }
            other => panic!("expected PublishFailed, got {other:?}"),
        }
    }

    /// Two identical generations must each call the synthesis backend —
    /// results are never cached across invocations.
    #[tokio::test]
    async fn identical_generations_are_not_cached() {
        let tts = Arc::new(MockTtsEngine::ok(vec![1u8]));
        let uploader: Arc<dyn ShareUploader> = Arc::new(OkUploader::new("https://file.io/abc123"));

        run_pipeline(
            Arc::clone(&tts),
            uploader,
            vec![
                PipelineCommand::Generate {
                    request: request("same text"),
                },
                PipelineCommand::Generate {
                    request: request("same text"),
                },
            ],
        )
        .await;

        assert_eq!(tts.call_count(), 2);
    }
}
