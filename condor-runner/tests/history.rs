//! Decision history file behaviour.

use std::io::Write;

use chrono::{Datelike, NaiveDate};
use condor_core::domain::{ConditionResult, Decision, ReasoningTrace, Rule};
use condor_core::DecisionFingerprint;
use condor_runner::report::render_history;
use condor_runner::{AppendOutcome, DecisionHistory, HistoryEntry};

fn entry(day: u32, fingerprint: &str) -> HistoryEntry {
    let trade_date = NaiveDate::from_ymd_opt(2026, 3, day).unwrap();
    HistoryEntry {
        trade_date,
        symbol: "SPY".into(),
        recorded_at: trade_date.and_hms_opt(15, 45, 0).unwrap(),
        fingerprint: DecisionFingerprint(fingerprint.to_string()),
        decision: Decision::NoSignal(ReasoningTrace::from(vec![ConditionResult::fail(
            Rule::VolatilityBand,
            "VIX 30.00 above maximum 25.00",
        )])),
    }
}

fn history() -> (tempfile::TempDir, DecisionHistory) {
    let dir = tempfile::tempdir().unwrap();
    let history = DecisionHistory::new(dir.path().join("nested").join("decisions.jsonl"));
    (dir, history)
}

#[test]
fn missing_file_reads_empty() {
    let (_dir, history) = history();
    assert!(history.read_all().unwrap().is_empty());
    assert!(history.recent(30).unwrap().is_empty());
    assert!(history.last().unwrap().is_none());
}

#[test]
fn append_creates_parent_directories() {
    let (_dir, history) = history();
    assert_eq!(history.append(&entry(2, "aa")).unwrap(), AppendOutcome::Written);
    assert!(history.path().exists());
}

#[test]
fn recent_is_newest_first_and_limited() {
    let (_dir, history) = history();
    for (day, fp) in [(2, "a"), (3, "b"), (4, "c"), (5, "d")] {
        history.append(&entry(day, fp)).unwrap();
    }

    let recent = history.recent(2).unwrap();
    let days: Vec<u32> = recent
        .iter()
        .map(|e| e.trade_date.day())
        .collect();
    assert_eq!(days, vec![5, 4]);
    assert_eq!(history.recent(30).unwrap().len(), 4);
}

#[test]
fn duplicate_of_last_entry_is_skipped() {
    let (_dir, history) = history();
    assert_eq!(history.append(&entry(2, "a")).unwrap(), AppendOutcome::Written);
    assert_eq!(history.append(&entry(2, "a")).unwrap(), AppendOutcome::Duplicate);
    assert_eq!(history.read_all().unwrap().len(), 1);
}

#[test]
fn only_the_last_entry_is_compared() {
    let (_dir, history) = history();
    history.append(&entry(2, "a")).unwrap();
    history.append(&entry(3, "b")).unwrap();
    assert_eq!(history.append(&entry(4, "a")).unwrap(), AppendOutcome::Written);
    assert_eq!(history.read_all().unwrap().len(), 3);
}

#[test]
fn malformed_lines_are_skipped() {
    let (_dir, history) = history();
    history.append(&entry(2, "a")).unwrap();
    {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(history.path())
            .unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();
    }
    history.append(&entry(3, "b")).unwrap();

    let all = history.read_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].fingerprint.as_str(), "b");
}

#[test]
fn history_renders_one_line_per_entry() {
    let (_dir, history) = history();
    history.append(&entry(2, "0123456789abcdef")).unwrap();
    history.append(&entry(3, "fedcba9876543210")).unwrap();

    let text = render_history(&history.recent(30).unwrap());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2026-03-03"));
    assert!(lines[0].contains("NO SIGNAL  volatility_band"));
    assert!(lines[0].ends_with("[fedcba987654]"));
}
