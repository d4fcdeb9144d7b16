//! Decision history — JSONL append-only log of daily decisions.
//!
//! One JSON object per line. Appending an entry whose fingerprint matches the
//! last stored entry is a no-op, so re-running the same day's job with the
//! same inputs never records the decision twice.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use condor_core::domain::Decision;
use condor_core::DecisionFingerprint;

/// One recorded decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub trade_date: NaiveDate,
    pub symbol: String,
    pub recorded_at: NaiveDateTime,
    pub fingerprint: DecisionFingerprint,
    pub decision: Decision,
}

/// What `append` did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Written,
    /// Same fingerprint as the last stored entry; nothing written.
    Duplicate,
}

/// JSONL history file manager.
#[derive(Debug, Clone)]
pub struct DecisionHistory {
    path: PathBuf,
}

impl DecisionHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append an entry unless it repeats the last stored one.
    pub fn append(&self, entry: &HistoryEntry) -> io::Result<AppendOutcome> {
        if let Some(last) = self.last()? {
            if last.fingerprint == entry.fingerprint {
                tracing::info!(
                    fingerprint = entry.fingerprint.short(),
                    "decision already recorded, skipping"
                );
                return Ok(AppendOutcome::Duplicate);
            }
        }

        let json = serde_json::to_string(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{json}")?;
        file.flush()?;

        tracing::info!(
            path = %self.path.display(),
            trade_date = %entry.trade_date,
            signal = entry.decision.is_signal(),
            "decision recorded"
        );
        Ok(AppendOutcome::Written)
    }

    /// Read all entries, oldest first. Malformed lines are skipped.
    pub fn read_all(&self) -> io::Result<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = fs::File::open(&self.path)?;
        let reader = io::BufReader::new(file);
        let mut entries = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    line = i + 1,
                    error = %e,
                    "skipping malformed history line"
                ),
            }
        }

        Ok(entries)
    }

    /// The newest `n` entries, newest first.
    pub fn recent(&self, n: usize) -> io::Result<Vec<HistoryEntry>> {
        let mut entries = self.read_all()?;
        entries.reverse();
        entries.truncate(n);
        Ok(entries)
    }

    pub fn last(&self) -> io::Result<Option<HistoryEntry>> {
        Ok(self.read_all()?.pop())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
