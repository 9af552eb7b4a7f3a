//! JSONL (JSON Lines) storage for step records.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::TimelineError;
use crate::core::ingest::{RawStep, ingest_steps};
use crate::core::step::Step;

/// Append-only step log, one JSON step per line.
///
/// Lines may use either the flat (`start`/`end`) or the buildbot (`times`)
/// shape; unfinished steps are skipped on read.
#[derive(Debug, Clone)]
pub struct StepLog {
    path: PathBuf,
}

impl StepLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        StepLog {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a single step, creating the file and its directory if needed.
    pub fn append(&self, step: &Step) -> Result<(), TimelineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TimelineError::Message(format!("failed to create directory: {e}")))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| TimelineError::Message(format!("failed to open file: {e}")))?;

        let json = serde_json::to_string(step)
            .map_err(|e| TimelineError::Message(format!("failed to serialize step: {e}")))?;

        writeln!(file, "{}", json)
            .map_err(|e| TimelineError::Message(format!("failed to write step: {e}")))?;

        Ok(())
    }

    /// Read all steps in file order.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, can't be read, or any
    /// non-empty line fails to parse.
    pub fn read_all(&self) -> Result<Vec<Step>, TimelineError> {
        if !self.path.exists() {
            return Err(TimelineError::Message(format!(
                "file not found: {}",
                self.path.display()
            )));
        }

        let file = File::open(&self.path)
            .map_err(|e| TimelineError::Message(format!("failed to open file: {e}")))?;

        let reader = BufReader::new(file);
        let mut raw = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| {
                TimelineError::Message(format!("failed to read line {}: {e}", line_num + 1))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let step: RawStep = serde_json::from_str(&line).map_err(|e| {
                TimelineError::Message(format!("failed to parse line {}: {e}", line_num + 1))
            })?;
            raw.push(step);
        }

        Ok(ingest_steps(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let log = StepLog::new(dir.path().join("logs/steps.jsonl"));

        log.append(&Step::new("[trigger] build", 10.0, 12.0)).unwrap();
        log.append(&Step::new("build", 20.0, 30.0)).unwrap();

        let steps = log.read_all().unwrap();
        assert_eq!(
            steps,
            vec![
                Step::new("[trigger] build", 10.0, 12.0),
                Step::new("build", 20.0, 30.0)
            ]
        );
    }

    #[test]
    fn test_mixed_shapes_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.jsonl");
        std::fs::write(
            &path,
            "{\"name\":\"compile\",\"times\":[1.0,2.0]}\n\n{\"name\":\"run\",\"times\":[2.0,null]}\n{\"name\":\"zip\",\"start\":3,\"end\":4}\n",
        )
        .unwrap();

        let steps = StepLog::new(&path).read_all().unwrap();
        assert_eq!(
            steps,
            vec![Step::new("compile", 1.0, 2.0), Step::new("zip", 3.0, 4.0)]
        );
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.jsonl");
        std::fs::write(&path, "{\"name\":\"ok\",\"start\":1,\"end\":2}\nnot json\n").unwrap();

        let err = StepLog::new(&path).read_all().unwrap_err();
        assert!(err.to_string().contains("failed to parse line 2"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StepLog::new(dir.path().join("none.jsonl")).read_all().unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }
}
