//! Supported narration languages.
//!
//! The selectable set is fixed.  Each language carries two codes:
//!
//! * `code()` — the full code shown in config files and the UI (`"en-uk"`).
//! * `synthesis_code()` — what the TTS backend receives.  The backend does
//!   not distinguish regional variants, so any `-region` suffix is stripped
//!   (`"en-uk"` → `"en"`).

use serde::{Deserialize, Serialize};

/// A narration language from the fixed supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    EnglishUs,
    EnglishUk,
    Spanish,
    French,
    German,
    Japanese,
    Hindi,
}

impl Language {
    /// All selectable languages, in UI display order.
    pub const ALL: [Language; 7] = [
        Language::EnglishUs,
        Language::EnglishUk,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Japanese,
        Language::Hindi,
    ];

    /// Human-readable label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Language::EnglishUs => "English (US)",
            Language::EnglishUk => "English (UK)",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Japanese => "Japanese",
            Language::Hindi => "Hindi",
        }
    }

    /// Full language code, including any regional suffix.
    pub fn code(&self) -> &'static str {
        match self {
            Language::EnglishUs => "en",
            Language::EnglishUk => "en-uk",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Japanese => "ja",
            Language::Hindi => "hi",
        }
    }

    /// Code sent to the synthesis backend: `code()` up to (not including) the
    /// first `-`.
    pub fn synthesis_code(&self) -> &'static str {
        let code = self.code();
        match code.find('-') {
            Some(idx) => &code[..idx],
            None => code,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::EnglishUs
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
