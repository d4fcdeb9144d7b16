//! Decision types — the engine's only output.
//!
//! A run produces exactly one `Decision`. Both variants carry the reasoning
//! trace: every entry condition's outcome, in evaluation order, followed by
//! derivation notes for the strike and sizing steps that were reached.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a step in the reasoning trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    VolatilityBand,
    EventCalendar,
    IvPercentile,
    ChainLiquidity,
    StrikeSelection,
    PositionSize,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::VolatilityBand => "volatility_band",
            Rule::EventCalendar => "event_calendar",
            Rule::IvPercentile => "iv_percentile",
            Rule::ChainLiquidity => "chain_liquidity",
            Rule::StrikeSelection => "strike_selection",
            Rule::PositionSize => "position_size",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one rule, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub rule: Rule,
    pub passed: bool,
    pub reason: String,
}

impl ConditionResult {
    pub fn pass(rule: Rule, reason: impl Into<String>) -> Self {
        Self {
            rule,
            passed: true,
            reason: reason.into(),
        }
    }

    pub fn fail(rule: Rule, reason: impl Into<String>) -> Self {
        Self {
            rule,
            passed: false,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConditionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{mark}] {}: {}", self.rule, self.reason)
    }
}

/// Ordered sequence of rule outcomes and derivation notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReasoningTrace(Vec<ConditionResult>);

impl ReasoningTrace {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, result: ConditionResult) {
        self.0.push(result);
    }

    pub fn entries(&self) -> &[ConditionResult] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every entry passed. An empty trace never passes.
    pub fn all_passed(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|r| r.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ConditionResult> {
        self.0.iter().filter(|r| !r.passed)
    }

    /// Outcome recorded for `rule`, if that step was reached.
    pub fn get(&self, rule: Rule) -> Option<&ConditionResult> {
        self.0.iter().find(|r| r.rule == rule)
    }

    pub fn failed(&self, rule: Rule) -> bool {
        self.get(rule).is_some_and(|r| !r.passed)
    }
}

impl From<Vec<ConditionResult>> for ReasoningTrace {
    fn from(results: Vec<ConditionResult>) -> Self {
        Self(results)
    }
}

/// Coarse risk grade of a proposed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// How much the engine trusts a proposed structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "LOW"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::High => write!(f, "HIGH"),
        }
    }
}

/// A fully specified iron condor proposal.
///
/// Prices (`*_premium`, `net_credit`, breakevens) are per share. Dollar
/// amounts (`*_per_contract`, `total_max_risk`, `max_risk_budget`) already
/// include the contract multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IronCondorSignal {
    // ── Context ──
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub expiration: NaiveDate,
    pub spot: f64,
    pub vix: f64,
    pub iv_percentile: f64,
    pub expected_move: f64,
    pub expected_move_pct: f64,

    // ── Legs ──
    pub long_put_strike: f64,
    pub short_put_strike: f64,
    pub short_call_strike: f64,
    pub long_call_strike: f64,
    pub long_put_premium: f64,
    pub short_put_premium: f64,
    pub short_call_premium: f64,
    pub long_call_premium: f64,

    // ── Economics ──
    pub wing_width: f64,
    pub net_credit: f64,
    pub net_credit_per_contract: f64,
    pub max_risk_per_contract: f64,
    pub breakeven_lower: f64,
    pub breakeven_upper: f64,

    // ── Sizing ──
    pub contracts: u32,
    pub total_max_risk: f64,
    pub max_risk_budget: f64,
    pub risk_percent: f64,

    // ── Assessment ──
    pub risk_level: RiskLevel,
    pub confidence: Confidence,
    pub warnings: Vec<String>,
    pub trace: ReasoningTrace,
}

impl IronCondorSignal {
    /// Best case per contract: the whole credit is kept.
    pub fn max_profit_per_contract(&self) -> f64 {
        self.net_credit_per_contract
    }

    pub fn total_credit(&self) -> f64 {
        self.net_credit_per_contract * f64::from(self.contracts)
    }

    /// Strike ordering invariant: `long_put < short_put < spot < short_call < long_call`.
    pub fn strikes_ordered(&self) -> bool {
        self.long_put_strike < self.short_put_strike
            && self.short_put_strike < self.spot
            && self.spot < self.short_call_strike
            && self.short_call_strike < self.long_call_strike
    }
}

/// The engine's verdict for one trade date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum Decision {
    Signal(IronCondorSignal),
    NoSignal(ReasoningTrace),
}

impl Decision {
    pub fn is_signal(&self) -> bool {
        matches!(self, Decision::Signal(_))
    }

    pub fn signal(&self) -> Option<&IronCondorSignal> {
        match self {
            Decision::Signal(s) => Some(s),
            Decision::NoSignal(_) => None,
        }
    }

    pub fn trace(&self) -> &ReasoningTrace {
        match self {
            Decision::Signal(s) => &s.trace,
            Decision::NoSignal(trace) => trace,
        }
    }
}
