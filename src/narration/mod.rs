//! Narration request model.
//!
//! A narration is built from three user inputs: the raw text, a [`Language`]
//! from a fixed set, and a cosmetic [`Tone`] label.  [`NarrationRequest`]
//! bundles them, validates the text, and produces the tagged text that is
//! actually sent to the synthesis backend.

pub mod language;
pub mod request;

pub use language::Language;
pub use request::{NarrationRequest, Tone, ValidationError};
