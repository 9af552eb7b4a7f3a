//! CLI command handler for `reconcile`.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::core::step::Step;
use crate::reconcile::{Anomaly, reconcile_with_report};
use crate::storage::{CsvExporter, load_steps};
use crate::{TimelineError, TimelineResult};

/// Machine-readable output of `reconcile`.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub input_steps: usize,
    pub steps: Vec<Step>,
    pub anomalies: Vec<Anomaly>,
}

pub fn build_report(steps: &[Step]) -> ReconcileReport {
    let reconciled = reconcile_with_report(steps);
    ReconcileReport {
        input_steps: steps.len(),
        steps: reconciled.steps,
        anomalies: reconciled.anomalies,
    }
}

/// Run the `reconcile` command.
///
/// Writes the report as JSON to `json` and the steps as CSV to `csv`. With
/// neither given, the JSON report goes to stdout.
pub fn run(steps_path: PathBuf, json: Option<PathBuf>, csv: Option<PathBuf>) -> TimelineResult<()> {
    let steps = load_steps(&steps_path)?;
    let report = build_report(&steps);
    info!(
        input = report.input_steps,
        output = report.steps.len(),
        anomalies = report.anomalies.len(),
        "reconciled"
    );

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| TimelineError::Message(format!("failed to serialize report: {e}")))?;

    if let Some(path) = &csv {
        CsvExporter::new().export(&report.steps, path)?;
        info!(path = %path.display(), "wrote CSV timeline");
    }

    match json {
        Some(path) => {
            std::fs::write(&path, rendered).map_err(|e| {
                TimelineError::Message(format!("failed to write {}: {e}", path.display()))
            })?;
            info!(path = %path.display(), "wrote JSON report");
        }
        None if csv.is_none() => println!("{}", rendered),
        None => {}
    }

    Ok(())
}
