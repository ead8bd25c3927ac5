//! Inline MP3 playback via rodio.
//!
//! [`AudioPlayer`] previews the generated narration straight from memory.
//! Playback is a convenience, not part of the generation workflow: when no
//! output device is available the app runs without it (the Play button is
//! simply absent) and narrations can still be generated, saved, and shared.

use std::io::Cursor;

use thiserror::Error;

/// Errors from the playback subsystem.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No usable audio output device / stream.
    #[error("audio output unavailable: {0}")]
    Device(String),

    /// The MP3 bytes could not be decoded.
    #[error("could not decode audio: {0}")]
    Decode(String),
}

/// Plays in-memory MP3 narrations on the default output device.
///
/// Owns the output stream for its whole lifetime; a fresh sink is created per
/// [`play`](Self::play) so stopping one narration never wedges the next.
pub struct AudioPlayer {
    stream: rodio::OutputStream,
    sink: rodio::Sink,
}

impl AudioPlayer {
    /// Open the default output device.
    ///
    /// # Errors
    ///
    /// [`PlaybackError::Device`] when no output stream can be opened — the
    /// caller should degrade to a playback-less UI rather than abort.
    pub fn try_new() -> Result<Self, PlaybackError> {
        let stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        let sink = rodio::Sink::connect_new(stream.mixer());
        Ok(Self { stream, sink })
    }

    /// Decode `mp3` and start playing it, replacing anything in progress.
    pub fn play(&mut self, mp3: Vec<u8>) -> Result<(), PlaybackError> {
        let source = rodio::Decoder::new(Cursor::new(mp3))
            .map_err(|e| PlaybackError::Decode(e.to_string()))?;

        self.sink.stop();
        self.sink = rodio::Sink::connect_new(self.stream.mixer());
        self.sink.append(source);
        Ok(())
    }

    /// Stop the current narration, if any.
    pub fn stop(&self) {
        self.sink.stop();
    }

    /// Whether a narration is currently queued or playing.
    pub fn is_playing(&self) -> bool {
        !self.sink.empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
