//! Integration tests for loading and reconciling real-shaped build documents.

use std::path::Path;

use build_timeline::storage::{StepLog, load_steps};
use build_timeline::{Anomaly, Step, reconcile, reconcile_with_report};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn test_swarming_build_fixture() {
    let steps = load_steps(&fixture("swarming_build.json")).expect("fixture should load");
    // The still-running cleanup step has no end time
    assert_eq!(steps.len(), 9);

    let report = reconcile_with_report(&steps);
    let names: Vec<&str> = report.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "steps",
            "bot_update",
            "compile",
            "base_unittests",
            "browser_tests",
            "archive_results"
        ]
    );

    let base = &report.steps[3];
    assert_eq!(base.start, 1_700_000_100.0);
    assert_eq!(base.end, 1_700_000_400.0);

    let browser = &report.steps[4];
    assert_eq!(browser.start, 1_700_000_104.0);
    assert_eq!(browser.end, 1_700_002_400.0);

    // compile had no trigger and keeps its own times
    assert_eq!(report.steps[2], Step::new("compile", 1_700_000_090.0, 1_700_000_095.0));

    assert_eq!(
        report.anomalies,
        vec![Anomaly::UnmatchedTrigger {
            name: "interactive_ui_tests".to_string(),
            index: 4
        }]
    );
}

#[test]
fn test_jsonl_and_json_agree() {
    let steps = load_steps(&fixture("swarming_build.json")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let log = StepLog::new(dir.path().join("steps.jsonl"));
    for step in &steps {
        log.append(step).unwrap();
    }

    let from_jsonl = load_steps(log.path()).unwrap();
    assert_eq!(from_jsonl, steps);
    assert_eq!(reconcile(&from_jsonl), reconcile(&steps));
}

#[test]
fn test_reconcile_is_idempotent() {
    let steps = load_steps(&fixture("swarming_build.json")).unwrap();
    let once = reconcile(&steps);
    let twice = reconcile(&once);
    assert_eq!(once, twice);
}

#[test]
fn test_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_steps(&dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
