//! Trigger/collect step reconciliation.
//!
//! Swarming-style builds run a `"[trigger] X"` step that launches work and a
//! later `"X"` step that collects it. For a timeline the pair is one entry
//! spanning trigger start to collect end.
//!
//! Precondition: a trigger step precedes the plain step it pairs with. A
//! trigger seen after an unmatched plain step of the same name is reported as
//! [`Anomaly::TriggerAfterPlain`]; the plain step is passed through unchanged.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::step::{Step, StepKind};

/// Irregularities found while reconciling. None of them stop reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// A trigger for `name` appeared after a plain step `name` that had no trigger.
    TriggerAfterPlain {
        name: String,
        plain_index: usize,
        trigger_index: usize,
    },
    /// A trigger step that no plain step consumed.
    UnmatchedTrigger { name: String, index: usize },
}

/// Reconciled steps plus the anomalies found on the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reconciliation {
    pub steps: Vec<Step>,
    pub anomalies: Vec<Anomaly>,
}

/// Merge trigger/collect pairs into single steps.
///
/// Trigger steps are never emitted. A plain step whose name matches the most
/// recently seen trigger's bare name takes that trigger's `start`; every other
/// plain step passes through unchanged, in input order.
pub fn reconcile(steps: &[Step]) -> Vec<Step> {
    reconcile_with_report(steps).steps
}

/// Like [`reconcile`], also reporting ordering violations and unmatched triggers.
pub fn reconcile_with_report(steps: &[Step]) -> Reconciliation {
    // bare name -> (input index, trigger step); last write wins
    let mut triggers: HashMap<&str, (usize, &Step)> = HashMap::new();
    let mut consumed: HashSet<usize> = HashSet::new();
    // plain steps that found no trigger, by name -> first input index
    let mut orphans: HashMap<&str, usize> = HashMap::new();

    let mut out = Vec::with_capacity(steps.len());
    let mut anomalies = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        match step.kind() {
            StepKind::Trigger { base_name } => {
                if let Some(&plain_index) = orphans.get(base_name) {
                    warn!(
                        step = base_name,
                        plain_index,
                        trigger_index = index,
                        "trigger step follows its collect step; pair left unmerged"
                    );
                    anomalies.push(Anomaly::TriggerAfterPlain {
                        name: base_name.to_string(),
                        plain_index,
                        trigger_index: index,
                    });
                }
                triggers.insert(base_name, (index, step));
            }
            StepKind::Plain { name } => match triggers.get(name) {
                Some(&(trigger_index, trigger)) => {
                    consumed.insert(trigger_index);
                    out.push(Step {
                        name: step.name.clone(),
                        start: trigger.start,
                        end: step.end,
                    });
                }
                None => {
                    orphans.entry(name).or_insert(index);
                    out.push(step.clone());
                }
            },
        }
    }

    for (index, step) in steps.iter().enumerate() {
        if let StepKind::Trigger { base_name } = step.kind() {
            if !consumed.contains(&index) {
                debug!(step = base_name, index, "dropping unmatched trigger step");
                anomalies.push(Anomaly::UnmatchedTrigger {
                    name: base_name.to_string(),
                    index,
                });
            }
        }
    }

    debug!(
        input = steps.len(),
        output = out.len(),
        anomalies = anomalies.len(),
        "reconciled steps"
    );

    Reconciliation {
        steps: out,
        anomalies,
    }
}
