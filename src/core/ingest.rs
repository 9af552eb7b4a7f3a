//! Ingestion of raw step documents.
//!
//! Accepted shapes:
//! - flat records: `{"name": "compile", "start": 5.0, "end": 8.0}`
//! - buildbot steps: `{"name": "compile", "times": [5.0, 8.0]}`
//! - a JSON array of either, or a build object `{"steps": [...]}`
//!
//! Plain steps without an end time are still running and have no bar
//! extent, so they are skipped. Trigger steps only contribute their start
//! time and are kept as long as that is known.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::step::Step;
use crate::{TimelineError, TimelineResult};

/// A step as it appears in an input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawStep {
    Flat {
        name: String,
        start: f64,
        #[serde(default)]
        end: Option<f64>,
    },
    Buildbot {
        name: String,
        times: Vec<Option<f64>>,
    },
}

/// Top-level shape of a step document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StepDocument {
    Steps(Vec<RawStep>),
    Build { steps: Vec<RawStep> },
}

impl StepDocument {
    pub fn into_raw_steps(self) -> Vec<RawStep> {
        match self {
            StepDocument::Steps(steps) => steps,
            StepDocument::Build { steps } => steps,
        }
    }
}

impl RawStep {
    pub fn name(&self) -> &str {
        match self {
            RawStep::Flat { name, .. } | RawStep::Buildbot { name, .. } => name,
        }
    }

    /// Convert to a `Step`, or `None` if the step has not started, or is a
    /// plain step that has not finished.
    ///
    /// An unfinished trigger step gets `end = start`.
    pub fn into_step(self) -> Option<Step> {
        let (name, start, end) = match self {
            RawStep::Flat { name, start, end } => (name, start, end),
            RawStep::Buildbot { name, times } => {
                let start = times.first().copied().flatten()?;
                (name, start, times.get(1).copied().flatten())
            }
        };
        match end {
            Some(end) => Some(Step { name, start, end }),
            None => {
                let step = Step { name, start, end: start };
                step.is_trigger().then_some(step)
            }
        }
    }
}

/// Convert raw steps into `Step`s, preserving order and skipping unfinished ones.
pub fn ingest_steps(raw: Vec<RawStep>) -> Vec<Step> {
    let total = raw.len();
    let steps: Vec<Step> = raw
        .into_iter()
        .filter_map(|r| {
            let name = r.name().to_string();
            let step = r.into_step();
            if step.is_none() {
                debug!(step = %name, "skipping unfinished step");
            }
            step
        })
        .collect();
    debug!(total, kept = steps.len(), "ingested steps");
    steps
}

/// Parse a JSON step document (array or build object) into `Step`s.
pub fn parse_step_document(json: &str) -> TimelineResult<Vec<Step>> {
    let doc: StepDocument = serde_json::from_str(json)
        .map_err(|e| TimelineError::Message(format!("failed to parse step document: {e}")))?;
    Ok(ingest_steps(doc.into_raw_steps()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_array() {
        let json = r#"[
            {"name": "[trigger] build", "start": 10, "end": 12},
            {"name": "build", "start": 20.5, "end": 30}
        ]"#;
        let steps = parse_step_document(json).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::new("[trigger] build", 10.0, 12.0),
                Step::new("build", 20.5, 30.0),
            ]
        );
    }

    #[test]
    fn test_parse_buildbot_build_object() {
        let json = r#"{
            "builderName": "Linux Tests",
            "number": 1234,
            "steps": [
                {"name": "steps", "times": [1.0, 2.0], "results": [0, []]},
                {"name": "compile", "times": [2.0, 9.5], "isFinished": true}
            ]
        }"#;
        let steps = parse_step_document(json).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1], Step::new("compile", 2.0, 9.5));
    }

    #[test]
    fn test_unfinished_steps_are_skipped() {
        let json = r#"[
            {"name": "compile", "times": [2.0, null]},
            {"name": "pending", "times": [null, null]},
            {"name": "running", "start": 3.0},
            {"name": "done", "start": 3.0, "end": 4.0}
        ]"#;
        let steps = parse_step_document(json).unwrap();
        assert_eq!(steps, vec![Step::new("done", 3.0, 4.0)]);
    }

    #[test]
    fn test_unfinished_trigger_still_pairs() {
        let json = r#"[
            {"name": "[trigger] X", "times": [1.0, null]},
            {"name": "X", "times": [5.0, 9.0]}
        ]"#;
        let steps = parse_step_document(json).unwrap();
        assert_eq!(
            steps,
            vec![Step::new("[trigger] X", 1.0, 1.0), Step::new("X", 5.0, 9.0)]
        );
        assert_eq!(
            crate::reconcile::reconcile(&steps),
            vec![Step::new("X", 1.0, 9.0)]
        );
    }

    #[test]
    fn test_unstarted_trigger_is_skipped() {
        let raw = RawStep::Buildbot {
            name: "[trigger] X".to_string(),
            times: vec![None, None],
        };
        assert_eq!(raw.into_step(), None);

        let raw = RawStep::Flat {
            name: "[trigger] Y".to_string(),
            start: 2.0,
            end: None,
        };
        assert_eq!(raw.into_step(), Some(Step::new("[trigger] Y", 2.0, 2.0)));
    }

    #[test]
    fn test_short_times_array_is_skipped() {
        let raw = RawStep::Buildbot {
            name: "odd".to_string(),
            times: vec![Some(1.0)],
        };
        assert_eq!(raw.into_step(), None);
    }

    #[test]
    fn test_invalid_document_is_an_error() {
        let result = parse_step_document(r#"{"name": 3}"#);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("failed to parse step document")
        );
    }
}
