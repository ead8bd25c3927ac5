//! Generation state machine.
//!
//! [`GenerationPhase`] tracks one generation attempt from button press to
//! completion.  The UI reads it to render the appropriate panel.
//!
//! Every click starts a fresh instance; no state carries across clicks.

// ---------------------------------------------------------------------------
// GenerationPhase
// ---------------------------------------------------------------------------

/// Phases of one audiobook generation.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──generate──▶ Validating
///        ──text empty──▶ Idle  (warning, no external call)
///        ──ok──▶ Synthesizing
///                ──backend error──▶ SynthesisFailed  (terminal)
///                ──ok──▶ Synthesized ──▶ Publishing
///                        ──link──▶ Published
///                        ──no link──▶ PublishFailed  (audio still usable)
/// Published / PublishFailed / SynthesisFailed ──next generate──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Waiting for the user to press Generate.
    Idle,

    /// Checking the request pre-conditions (non-empty text).
    Validating,

    /// The synthesis backend is producing audio.  Unbounded wait.
    Synthesizing,

    /// Synthesis failed; the generation is over.  No publish is attempted.
    SynthesisFailed,

    /// Audio is in hand; publishing is about to start.
    Synthesized,

    /// The narration file is being written and uploaded (bounded timeout).
    Publishing,

    /// Upload succeeded — a share link and QR code are available.
    Published,

    /// Upload failed — the audio is still playable and saved locally.
    PublishFailed,
}

impl GenerationPhase {
    /// Returns `true` while a generation is in flight.
    ///
    /// The UI uses this to disable the Generate button; only one generation
    /// runs per session at a time.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            GenerationPhase::Validating
                | GenerationPhase::Synthesizing
                | GenerationPhase::Synthesized
                | GenerationPhase::Publishing
        )
    }

    /// Returns `true` once synthesized audio exists for this generation.
    pub fn has_audio(&self) -> bool {
        matches!(
            self,
            GenerationPhase::Synthesized
                | GenerationPhase::Publishing
                | GenerationPhase::Published
                | GenerationPhase::PublishFailed
        )
    }

    /// A short human-readable label suitable for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            GenerationPhase::Idle => "Ready",
            GenerationPhase::Validating => "Validating",
            GenerationPhase::Synthesizing => "Generating audio",
            GenerationPhase::SynthesisFailed => "Generation failed",
            GenerationPhase::Synthesized => "Audio ready",
            GenerationPhase::Publishing => "Creating share link",
            GenerationPhase::Published => "Done",
            GenerationPhase::PublishFailed => "Done (no share link)",
        }
    }
}

impl Default for GenerationPhase {
    fn default() -> Self {
        GenerationPhase::Idle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- is_busy ---

    #[test]
    fn idle_is_not_busy() {
        assert!(!GenerationPhase::Idle.is_busy());
    }

    #[test]
    fn validating_is_busy() {
        assert!(GenerationPhase::Validating.is_busy());
    }

    #[test]
    fn synthesizing_is_busy() {
        assert!(GenerationPhase::Synthesizing.is_busy());
    }

    #[test]
    fn publishing_is_busy() {
        assert!(GenerationPhase::Publishing.is_busy());
    }

    #[test]
    fn terminal_phases_are_not_busy() {
        assert!(!GenerationPhase::SynthesisFailed.is_busy());
        assert!(!GenerationPhase::Published.is_busy());
        assert!(!GenerationPhase::PublishFailed.is_busy());
    }

    // ---- has_audio ---

    #[test]
    fn no_audio_before_synthesis_completes() {
        assert!(!GenerationPhase::Idle.has_audio());
        assert!(!GenerationPhase::Validating.has_audio());
        assert!(!GenerationPhase::Synthesizing.has_audio());
        assert!(!GenerationPhase::SynthesisFailed.has_audio());
    }

    #[test]
    fn audio_survives_publish_failure() {
        assert!(GenerationPhase::Published.has_audio());
        assert!(GenerationPhase::PublishFailed.has_audio());
    }

    // ---- label ---

    #[test]
    fn labels_are_distinct_for_terminal_outcomes() {
        assert_ne!(
            GenerationPhase::Published.label(),
            GenerationPhase::PublishFailed.label()
        );
        assert_ne!(
            GenerationPhase::Published.label(),
            GenerationPhase::SynthesisFailed.label()
        );
    }

    // ---- Default ---

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(GenerationPhase::default(), GenerationPhase::Idle);
    }
}
