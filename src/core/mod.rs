//! Core types for build-timeline.
//!
//! `Step` is the record every other module consumes; `ingest` turns the raw
//! JSON shapes produced by buildbot into steps.

pub mod ingest;
pub mod step;

// Re-export key types for convenience
pub use ingest::{RawStep, StepDocument, ingest_steps, parse_step_document};
pub use step::{Step, StepKind, TRIGGER_MARKER};
