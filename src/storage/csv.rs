//! CSV export for reconciled timelines.

use std::io::Write;
use std::path::Path;

use crate::TimelineError;
use crate::core::step::Step;

/// CSV column headers in deterministic order.
pub const CSV_HEADERS: &[&str] = &["index", "name", "start", "end", "duration_secs"];

/// CSV exporter for step timelines.
///
/// One row per step, times as epoch seconds with millisecond precision.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        CsvExporter
    }

    /// Export steps to a CSV file, creating its parent directory if needed.
    pub fn export(&self, steps: &[Step], output: &Path) -> Result<(), TimelineError> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TimelineError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let file = std::fs::File::create(output)
            .map_err(|e| TimelineError::Message(format!("failed to create file: {e}")))?;

        self.export_to_writer(steps, file)
    }

    /// Export steps to any writer implementing Write.
    pub fn export_to_writer<W: Write>(&self, steps: &[Step], writer: W) -> Result<(), TimelineError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(CSV_HEADERS)
            .map_err(|e| TimelineError::Message(format!("failed to write CSV headers: {e}")))?;

        for (index, step) in steps.iter().enumerate() {
            csv_writer
                .write_record(&self.step_to_row(index, step))
                .map_err(|e| TimelineError::Message(format!("failed to write CSV row: {e}")))?;
        }

        csv_writer
            .flush()
            .map_err(|e| TimelineError::Message(format!("failed to flush CSV writer: {e}")))?;

        Ok(())
    }

    fn step_to_row(&self, index: usize, step: &Step) -> Vec<String> {
        vec![
            index.to_string(),
            step.name.clone(),
            format!("{:.3}", step.start),
            format!("{:.3}", step.end),
            format!("{:.3}", step.duration_secs()),
        ]
    }
}
