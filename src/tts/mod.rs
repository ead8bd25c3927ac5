//! TTS (text-to-speech) engine module.
//!
//! [`TtsEngine`] is the interface the pipeline talks to; [`GoogleTtsEngine`]
//! is the production implementation backed by the Google Translate TTS
//! endpoint.  Text longer than one request allows is split by
//! [`chunk::chunk_text`] and the MP3 responses are concatenated.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use echoverse::config::TtsConfig;
//! use echoverse::tts::{GoogleTtsEngine, TtsEngine};
//!
//! # async fn example() {
//! let engine = GoogleTtsEngine::from_config(&TtsConfig::default());
//! let mp3 = engine.synthesize("[Neutral Version] Hello", "en").await.unwrap();
//! std::fs::write("hello.mp3", mp3).unwrap();
//! # }
//! ```

pub mod chunk;
pub mod engine;

pub use chunk::{chunk_text, MAX_CHUNK_CHARS};
pub use engine::{GoogleTtsEngine, TtsEngine, TtsError};

// test-only re-export so the pipeline test module can import MockTtsEngine
// without `use echoverse::tts::engine::MockTtsEngine`.
#[cfg(test)]
pub use engine::MockTtsEngine;
