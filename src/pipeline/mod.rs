//! Generation pipeline for EchoVerse.
//!
//! This module wires the full validate → synthesize → publish workflow and
//! exposes:
//! * [`GenerationPhase`] — the per-generation state machine the UI renders.
//! * [`PipelineOrchestrator`] — the background task driving one generation
//!   at a time.
//! * [`PipelineCommand`] / [`PipelineEvent`] — the mpsc message types between
//!   the UI thread and the orchestrator.

pub mod runner;
pub mod state;

pub use runner::{PipelineCommand, PipelineEvent, PipelineOrchestrator};
pub use state::GenerationPhase;
