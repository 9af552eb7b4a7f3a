pub mod chart;
pub mod config;
pub mod core;
pub mod links;
pub mod reconcile;
pub mod storage;

pub mod gantt_cmd;
pub mod link_cmd;
pub mod reconcile_cmd;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type TimelineResult<T> = Result<T, TimelineError>;

// Re-export the pieces most callers need
pub use crate::core::step::{Step, StepKind, TRIGGER_MARKER};
pub use crate::reconcile::{Anomaly, Reconciliation, reconcile, reconcile_with_report};
