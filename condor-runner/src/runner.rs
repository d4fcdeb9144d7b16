//! Daily run — wires inputs, calendar, engine, and history together.
//!
//! One call produces one decision for one trade date:
//! load snapshot → add calendar events → evaluate → fingerprint → record.

use std::io;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use condor_core::domain::{Decision, MarketSnapshot};
use condor_core::{evaluate, DecisionFingerprint, EngineError};

use crate::calendar::EconomicCalendar;
use crate::config::RunnerConfig;
use crate::error::LoadError;
use crate::history::{AppendOutcome, DecisionHistory, HistoryEntry};
use crate::snapshot_loader::{load_chain_csv, load_snapshot_json, SnapshotHeader};

/// Errors from a daily run. Any of these means no decision was produced.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("history error: {0}")]
    History(#[from] io::Error),
    #[error("fingerprint error: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

/// Where the day's snapshot comes from.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    /// A complete snapshot JSON file.
    Json(PathBuf),
    /// A CSV option chain; the remaining fields come from `header`.
    Csv { path: PathBuf, header: SnapshotHeader },
    /// An already-built snapshot (synthetic runs, tests).
    Provided(MarketSnapshot),
}

impl SnapshotSource {
    pub fn load(self) -> Result<MarketSnapshot, LoadError> {
        match self {
            SnapshotSource::Json(path) => load_snapshot_json(&path),
            SnapshotSource::Csv { path, header } => {
                let chain = load_chain_csv(&path)?;
                Ok(header.with_chain(chain))
            }
            SnapshotSource::Provided(snapshot) => Ok(snapshot),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Evaluate only; never touch the history file.
    pub dry_run: bool,
}

/// Everything a daily run produced.
#[derive(Debug, Clone)]
pub struct DailyRun {
    /// The snapshot as evaluated, calendar events included.
    pub snapshot: MarketSnapshot,
    pub decision: Decision,
    pub fingerprint: DecisionFingerprint,
    /// `None` when history is disabled or the run was dry.
    pub recorded: Option<AppendOutcome>,
}

/// Produce and record the decision for one trade date.
///
/// `now` stamps the history entry; it does not influence the decision.
pub fn run_daily(
    config: &RunnerConfig,
    source: SnapshotSource,
    options: RunOptions,
    now: NaiveDateTime,
) -> Result<DailyRun, RunError> {
    let mut snapshot = source.load()?;

    if config.calendar.enabled {
        let calendar = EconomicCalendar::from_config(&config.calendar);
        if !calendar.is_trading_day(snapshot.trade_date) {
            tracing::warn!(trade_date = %snapshot.trade_date, "trade date is not a trading day");
        }
        let added = calendar.annotate(&mut snapshot);
        if added > 0 {
            tracing::info!(added, trade_date = %snapshot.trade_date, "calendar events added");
        }
    }

    let engine_config = config.engine_config();
    let decision = evaluate(&snapshot, &engine_config)?;
    let fingerprint = DecisionFingerprint::of(&snapshot, &engine_config)?;

    let recorded = if config.history.enabled && !options.dry_run {
        let history = DecisionHistory::new(&config.history.path);
        let entry = HistoryEntry {
            trade_date: snapshot.trade_date,
            symbol: snapshot.symbol.clone(),
            recorded_at: now,
            fingerprint: fingerprint.clone(),
            decision: decision.clone(),
        };
        Some(history.append(&entry)?)
    } else {
        None
    };

    Ok(DailyRun {
        snapshot,
        decision,
        fingerprint,
        recorded,
    })
}
