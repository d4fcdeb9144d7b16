//! Condor Runner — daily orchestration around the `condor-core` engine.
//!
//! This crate builds on `condor-core` to provide:
//! - TOML runner configuration with production defaults
//! - Snapshot inputs (JSON snapshot, CSV option chain)
//! - Economic calendar heuristics (FOMC, jobs report, CPI)
//! - JSONL decision history with fingerprint de-duplication
//! - Plain-text decision and system-error reports

pub mod calendar;
pub mod config;
pub mod error;
pub mod history;
pub mod report;
pub mod runner;
pub mod snapshot_loader;

pub use calendar::EconomicCalendar;
pub use config::RunnerConfig;
pub use error::LoadError;
pub use history::{AppendOutcome, DecisionHistory, HistoryEntry};
pub use runner::{run_daily, DailyRun, RunError, RunOptions, SnapshotSource};
pub use snapshot_loader::SnapshotHeader;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<RunnerConfig>();
        assert_sync::<RunnerConfig>();
    }

    #[test]
    fn history_types_are_send_sync() {
        assert_send::<HistoryEntry>();
        assert_sync::<HistoryEntry>();
        assert_send::<DecisionHistory>();
        assert_sync::<DecisionHistory>();
    }

    #[test]
    fn run_types_are_send_sync() {
        assert_send::<DailyRun>();
        assert_sync::<DailyRun>();
        assert_send::<RunError>();
        assert_sync::<RunError>();
        assert_send::<SnapshotSource>();
        assert_sync::<SnapshotSource>();
    }
}
