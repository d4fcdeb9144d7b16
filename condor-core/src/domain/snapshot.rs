//! Market snapshot — the day's immutable engine input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::option::{OptionContract, OptionType};

/// Category tag of a scheduled economic event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    FedDecision,
    CpiRelease,
    JobsReport,
    Earnings,
    Gdp,
    Other(String),
}

impl EventCategory {
    /// The categories that block a trade unless configured otherwise.
    pub fn default_high_impact() -> Vec<EventCategory> {
        vec![
            EventCategory::FedDecision,
            EventCategory::CpiRelease,
            EventCategory::JobsReport,
        ]
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventCategory::FedDecision => write!(f, "Fed decision"),
            EventCategory::CpiRelease => write!(f, "CPI release"),
            EventCategory::JobsReport => write!(f, "Jobs report"),
            EventCategory::Earnings => write!(f, "Earnings"),
            EventCategory::Gdp => write!(f, "GDP"),
            EventCategory::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A scheduled economic release on the trade date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    pub category: EventCategory,
    #[serde(default)]
    pub title: String,
}

impl EconomicEvent {
    pub fn new(category: EventCategory, title: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
        }
    }
}

fn default_symbol() -> String {
    "SPY".to_string()
}

/// Everything the engine knows about the market for one trade date.
///
/// Built once per run by the market-data adapter and never mutated. The
/// chain is kept in the order the provider delivered it; nothing in the
/// engine relies on it being sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(default = "default_symbol")]
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub spot: f64,
    pub vix: f64,
    pub iv_percentile: f64,
    pub chain: Vec<OptionContract>,
    #[serde(default)]
    pub events: Vec<EconomicEvent>,
}

impl MarketSnapshot {
    /// The expiration the structure is built on: the earliest listed
    /// expiration on or after the trade date (0DTE when listed).
    pub fn trading_expiration(&self) -> Option<NaiveDate> {
        self.chain
            .iter()
            .map(|c| c.expiration)
            .filter(|exp| *exp >= self.trade_date)
            .min()
    }

    /// Contracts of one type at one expiration.
    pub fn contracts(
        &self,
        expiration: NaiveDate,
        option_type: OptionType,
    ) -> impl Iterator<Item = &OptionContract> {
        self.chain
            .iter()
            .filter(move |c| c.expiration == expiration && c.option_type == option_type)
    }

    /// Expected one-day move in points: `spot * (vix / 100) * sqrt(1 / 365)`.
    pub fn expected_move(&self) -> f64 {
        expected_move(self.spot, self.vix)
    }
}

/// One-sigma one-day move implied by an annualised volatility index level.
pub fn expected_move(spot: f64, vix: f64) -> f64 {
    spot * (vix / 100.0) * (1.0_f64 / 365.0).sqrt()
}
