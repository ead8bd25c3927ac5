//! `NarrationRequest` and the cosmetic `Tone` label.
//!
//! The tone is concatenated into the text as a `"[<Tone> Version] "` prefix;
//! it never alters synthesis parameters (voice, pitch, rate).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Language;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Narration tone label (tag only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Neutral,
    Friendly,
    Professional,
    Dramatic,
}

impl Tone {
    /// All selectable tones, in UI display order.
    pub const ALL: [Tone; 4] = [
        Tone::Neutral,
        Tone::Friendly,
        Tone::Professional,
        Tone::Dramatic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Neutral => "Neutral",
            Tone::Friendly => "Friendly",
            Tone::Professional => "Professional",
            Tone::Dramatic => "Dramatic",
        }
    }
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Neutral
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// Pre-condition failure — produced before any external call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text is empty or whitespace-only after trimming.
    #[error("Please enter or upload text before generating audio.")]
    EmptyText,
}

// ---------------------------------------------------------------------------
// NarrationRequest
// ---------------------------------------------------------------------------

/// One generation request: text + language + tone.
///
/// Requests are independent and stateless; nothing is cached or deduplicated
/// across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationRequest {
    /// Raw user text, kept verbatim (not trimmed).
    pub text: String,
    pub language: Language,
    pub tone: Tone,
}

impl NarrationRequest {
    pub fn new(text: impl Into<String>, language: Language, tone: Tone) -> Self {
        Self {
            text: text.into(),
            language,
            tone,
        }
    }

    /// Check the request is synthesizable.
    ///
    /// Returns [`ValidationError::EmptyText`] when the text trims to nothing.
    /// This is a warning-level short circuit, not an error path: callers must
    /// perform it before invoking the synthesis backend.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(())
    }

    /// The exact string handed to the synthesis backend:
    /// `"[<Tone> Version] " + text`, text untouched.
    pub fn tagged_text(&self) -> String {
        format!("[{} Version] {}", self.tone.label(), self.text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_text_prepends_tone_tag_verbatim() {
        for tone in Tone::ALL {
            for language in Language::ALL {
                let req = NarrationRequest::new("Once upon a time.", language, tone);
                assert_eq!(
                    req.tagged_text(),
                    format!("[{} Version] Once upon a time.", tone.label())
                );
            }
        }
    }

    #[test]
    fn tagged_text_does_not_trim_the_input() {
        let req = NarrationRequest::new("  spaced  ", Language::French, Tone::Dramatic);
        assert_eq!(req.tagged_text(), "[Dramatic Version]   spaced  ");
    }

    #[test]
    fn validate_accepts_non_empty_text() {
        let req = NarrationRequest::new("hello", Language::default(), Tone::default());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_text() {
        let req = NarrationRequest::new("", Language::default(), Tone::default());
        assert_eq!(req.validate(), Err(ValidationError::EmptyText));
    }

    #[test]
    fn validate_rejects_whitespace_only_text() {
        let req = NarrationRequest::new(" \t\n ", Language::default(), Tone::default());
        assert_eq!(req.validate(), Err(ValidationError::EmptyText));
    }

    #[test]
    fn validation_error_message_is_user_facing() {
        let msg = ValidationError::EmptyText.to_string();
        assert!(msg.contains("enter or upload text"));
    }

    #[test]
    fn tone_labels_match_the_fixed_set() {
        let labels: Vec<&str> = Tone::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec!["Neutral", "Friendly", "Professional", "Dramatic"]
        );
    }
}
