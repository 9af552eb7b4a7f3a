//! Loading and exporting step data.

pub mod csv;
pub mod jsonl;

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::core::ingest::parse_step_document;
use crate::core::step::Step;
use crate::TimelineResult;

// Re-export key types
pub use csv::{CSV_HEADERS, CsvExporter};
pub use jsonl::StepLog;

/// Load steps from `path`.
///
/// `.jsonl` files are read line by line; anything else is parsed as a single
/// JSON document (array of steps or a build object with `steps`).
pub fn load_steps(path: &Path) -> TimelineResult<Vec<Step>> {
    let is_jsonl = path.extension().and_then(|e| e.to_str()) == Some("jsonl");
    let steps = if is_jsonl {
        StepLog::new(path).read_all()?
    } else {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_step_document(&s)?
    };
    info!(path = %path.display(), steps = steps.len(), "loaded steps");
    Ok(steps)
}
