//! Core `TtsEngine` trait and the Google Translate TTS implementation.
//!
//! [`GoogleTtsEngine`] calls the public `translate_tts` endpoint
//! (`client=tw-ob`) — the same backend the gTTS family of libraries uses.
//! Input longer than one request allows is chunked and the returned MP3
//! frames are concatenated into a single byte stream.
//!
//! [`MockTtsEngine`] (available under `#[cfg(test)]`) is a canned-response
//! double with an invocation counter, for testing the pipeline without
//! network access.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TtsConfig;
use crate::tts::chunk::{chunk_text, MAX_CHUNK_CHARS};

// ---------------------------------------------------------------------------
// TtsError
// ---------------------------------------------------------------------------

/// Errors from the synthesis backend.
///
/// All variants carry user-presentable text; the pipeline reports them
/// verbatim and aborts the generation (no retry, no publish attempt).
#[derive(Debug, Clone, Error)]
pub enum TtsError {
    /// HTTP transport or connection error.
    #[error("speech synthesis request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success HTTP status.
    #[error("speech synthesis backend error (HTTP {status}): {body}")]
    Backend { status: u16, body: String },

    /// The backend returned no audio bytes.
    #[error("speech synthesis returned no audio")]
    EmptyAudio,
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        TtsError::Request(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// TtsEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a speech synthesis backend.
///
/// # Contract
///
/// * `text` is the full tagged text to narrate.
/// * `lang` is a plain 2-letter code with no region suffix
///   (see [`Language::synthesis_code`](crate::narration::Language::synthesis_code)).
/// * On success the **complete** MP3 byte stream is returned; audio is never
///   streamed incrementally.
#[async_trait]
pub trait TtsEngine: Send + Sync {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError>;
}

// Compile-time assertion: Box<dyn TtsEngine> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn TtsEngine>) {}
};

// ---------------------------------------------------------------------------
// GoogleTtsEngine
// ---------------------------------------------------------------------------

/// Production engine calling the Google Translate TTS endpoint.
///
/// The HTTP client is built **without** a request timeout: synthesis latency
/// scales with text length and the caller's generation blocks until it
/// completes.  (The publish stage has its own bounded timeout.)
pub struct GoogleTtsEngine {
    client: reqwest::Client,
    config: TtsConfig,
}

impl GoogleTtsEngine {
    /// Build an engine from application config.
    pub fn from_config(config: &TtsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    fn synthesis_url(&self) -> String {
        format!("{}/translate_tts", self.config.base_url)
    }

    /// Fetch one chunk of MP3 audio.
    async fn fetch_chunk(&self, chunk: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        // ttsspeed matches the endpoint's slow-speech flag: 1 = normal.
        let speed = if self.config.slow { "0.24" } else { "1" };

        let response = self
            .client
            .get(self.synthesis_url())
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("ttsspeed", speed),
                ("q", chunk),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TtsEngine for GoogleTtsEngine {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);

        log::debug!(
            "synthesizing {} chars in {} chunk(s), lang={lang}",
            text.chars().count(),
            chunks.len()
        );

        let mut audio = Vec::new();
        for chunk in &chunks {
            // Sequential, not concurrent: chunk order is narration order and
            // MP3 frames are concatenated in place.
            audio.extend_from_slice(&self.fetch_chunk(chunk, lang).await?);
        }

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        log::info!("synthesis complete: {} bytes of MP3", audio.len());
        Ok(audio)
    }
}

// ---------------------------------------------------------------------------
// MockTtsEngine  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns a canned response and counts invocations.
#[cfg(test)]
pub struct MockTtsEngine {
    response: Result<Vec<u8>, TtsError>,
    calls: std::sync::atomic::AtomicUsize,
    last_input: std::sync::Mutex<Option<(String, String)>>,
}

#[cfg(test)]
impl MockTtsEngine {
    /// Create a mock that always returns `Ok(audio)`.
    pub fn ok(audio: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(audio.into()),
            calls: std::sync::atomic::AtomicUsize::new(0),
            last_input: std::sync::Mutex::new(None),
        }
    }

    /// Create a mock that always returns `Err(error)`.
    pub fn err(error: TtsError) -> Self {
        Self {
            response: Err(error),
            calls: std::sync::atomic::AtomicUsize::new(0),
            last_input: std::sync::Mutex::new(None),
        }
    }

    /// How many times `synthesize` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// The `(text, lang)` pair from the most recent call.
    pub fn last_input(&self) -> Option<(String, String)> {
        self.last_input.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl TtsEngine for MockTtsEngine {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, TtsError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some((text.to_string(), lang.to_string()));
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_builds_without_panic() {
        let _engine = GoogleTtsEngine::from_config(&TtsConfig::default());
    }

    #[test]
    fn synthesis_url_joins_base_and_path() {
        let engine = GoogleTtsEngine::from_config(&TtsConfig::default());
        assert_eq!(
            engine.synthesis_url(),
            "https://translate.google.com/translate_tts"
        );
    }

    /// Verify that `GoogleTtsEngine` is usable as `dyn TtsEngine`.
    #[test]
    fn engine_is_object_safe() {
        let engine: Box<dyn TtsEngine> =
            Box::new(GoogleTtsEngine::from_config(&TtsConfig::default()));
        drop(engine);
    }

    #[tokio::test]
    async fn mock_ok_returns_configured_audio() {
        let engine = MockTtsEngine::ok(vec![1u8, 2, 3]);
        let audio = engine.synthesize("hello", "en").await.unwrap();
        assert_eq!(audio, vec![1, 2, 3]);
        assert_eq!(engine.call_count(), 1);
    }

    #[tokio::test]
    async fn mock_err_returns_configured_error() {
        let engine = MockTtsEngine::err(TtsError::Request("connection refused".into()));
        let err = engine.synthesize("hello", "en").await.unwrap_err();
        assert!(matches!(err, TtsError::Request(_)));
    }

    #[tokio::test]
    async fn mock_records_last_input() {
        let engine = MockTtsEngine::ok(vec![0u8]);
        engine.synthesize("[Neutral Version] hi", "en").await.unwrap();
        let (text, lang) = engine.last_input().unwrap();
        assert_eq!(text, "[Neutral Version] hi");
        assert_eq!(lang, "en");
    }

    #[test]
    fn backend_error_display_includes_status() {
        let e = TtsError::Backend {
            status: 404,
            body: "not found".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("not found"));
    }
}
