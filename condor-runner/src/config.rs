//! Runner configuration file (TOML).
//!
//! Every section and field is optional; anything missing falls back to the
//! production defaults. `engine_config()` extracts the part the engine sees.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use condor_core::domain::EventCategory;
use condor_core::{EngineConfig, LiquidityThresholds, TieBreak};

use crate::error::LoadError;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub account: AccountSection,
    pub signal: SignalSection,
    pub liquidity: LiquiditySection,
    pub calendar: CalendarSection,
    pub history: HistorySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSection {
    pub capital: f64,
    pub max_risk_percent: f64,
}

impl Default for AccountSection {
    fn default() -> Self {
        Self {
            capital: 5_000.0,
            max_risk_percent: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSection {
    pub symbol: String,
    pub min_vix: f64,
    pub max_vix: f64,
    pub min_iv_percentile: f64,
    pub wing_width: f64,
    pub cushion: f64,
    pub search_window_moves: f64,
    pub tie_break: TieBreak,
    pub contract_multiplier: f64,
    pub high_impact_events: Vec<EventCategory>,
}

impl Default for SignalSection {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            symbol: "SPY".to_string(),
            min_vix: engine.vix_min,
            max_vix: engine.vix_max,
            min_iv_percentile: engine.min_iv_percentile,
            wing_width: engine.wing_width,
            cushion: engine.cushion,
            search_window_moves: engine.search_window_moves,
            tie_break: engine.tie_break,
            contract_multiplier: engine.contract_multiplier,
            high_impact_events: engine.high_impact_events,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiquiditySection {
    pub min_open_interest: u64,
    pub max_spread_fraction: f64,
}

impl Default for LiquiditySection {
    fn default() -> Self {
        let t = LiquidityThresholds::default();
        Self {
            min_open_interest: t.min_open_interest,
            max_spread_fraction: t.max_spread_fraction,
        }
    }
}

/// Economic calendar heuristics applied to each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    pub enabled: bool,
    pub fomc_dates: Vec<NaiveDate>,
    /// Exchange holidays; a run on one is logged as a non-trading day.
    pub holidays: Vec<NaiveDate>,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            enabled: true,
            fomc_dates: dates(&[
                (2026, 1, 28),
                (2026, 3, 18),
                (2026, 5, 6),
                (2026, 6, 17),
                (2026, 7, 29),
                (2026, 9, 16),
                (2026, 11, 4),
                (2026, 12, 16),
            ]),
            holidays: dates(&[
                (2026, 1, 1),
                (2026, 1, 19),
                (2026, 2, 16),
                (2026, 4, 3),
                (2026, 5, 25),
                (2026, 7, 3),
                (2026, 9, 7),
                (2026, 11, 26),
                (2026, 12, 25),
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySection {
    pub enabled: bool,
    pub path: PathBuf,
    /// Entries shown by `condorlab history` when no limit is given.
    pub display_limit: usize,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("history/decisions.jsonl"),
            display_limit: 30,
        }
    }
}

fn dates(ymd: &[(i32, u32, u32)]) -> Vec<NaiveDate> {
    ymd.iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

impl RunnerConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_toml(&content).map_err(|source| LoadError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String, LoadError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The engine's view of this configuration. Validation happens in the engine.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            capital: self.account.capital,
            max_risk_percent: self.account.max_risk_percent,
            vix_min: self.signal.min_vix,
            vix_max: self.signal.max_vix,
            min_iv_percentile: self.signal.min_iv_percentile,
            liquidity: LiquidityThresholds {
                min_open_interest: self.liquidity.min_open_interest,
                max_spread_fraction: self.liquidity.max_spread_fraction,
            },
            wing_width: self.signal.wing_width,
            cushion: self.signal.cushion,
            search_window_moves: self.signal.search_window_moves,
            tie_break: self.signal.tie_break,
            contract_multiplier: self.signal.contract_multiplier,
            high_impact_events: self.signal.high_impact_events.clone(),
        }
    }
}
