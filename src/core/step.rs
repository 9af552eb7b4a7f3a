//! Build step records and trigger/plain classification.

use serde::{Deserialize, Serialize};

/// Marker prefixed (followed by one space) to the name of a trigger step.
pub const TRIGGER_MARKER: &str = "[trigger]";

/// One named phase of a build execution.
///
/// `start` and `end` are seconds since the Unix epoch, the unit buildbot
/// reports step times in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub start: f64,
    pub end: f64,
}

/// Classification of a step by its name.
///
/// Trigger steps start asynchronous work; the plain step sharing the
/// trigger's bare name collects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind<'a> {
    Trigger { base_name: &'a str },
    Plain { name: &'a str },
}

impl Step {
    pub fn new(name: impl Into<String>, start: f64, end: f64) -> Self {
        Step {
            name: name.into(),
            start,
            end,
        }
    }

    /// Classify this step as a trigger or plain step.
    ///
    /// A name is a trigger iff it is `TRIGGER_MARKER`, one space, then the
    /// bare phase name.
    pub fn kind(&self) -> StepKind<'_> {
        match self
            .name
            .strip_prefix(TRIGGER_MARKER)
            .and_then(|rest| rest.strip_prefix(' '))
        {
            Some(base_name) => StepKind::Trigger { base_name },
            None => StepKind::Plain { name: &self.name },
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self.kind(), StepKind::Trigger { .. })
    }

    /// Wall-clock duration in seconds. Negative if `end < start`.
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}
