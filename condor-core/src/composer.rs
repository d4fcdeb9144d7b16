//! Signal composer — turns selected strikes and a position size into a decision.

use crate::config::EngineConfig;
use crate::domain::{
    Confidence, ConditionResult, Decision, IronCondorSignal, MarketSnapshot, ReasoningTrace,
    RiskLevel, Rule,
};
use crate::sizer::{PositionSize, SizingError};
use crate::strikes::CondorStrikes;

const ELEVATED_VIX: f64 = 20.0;
const TIGHT_MOVE_PCT: f64 = 1.5;
const WIDE_MOVE_PCT: f64 = 2.0;

/// Build the signal for a structure that passed every rule and could be sized.
///
/// `trace` holds the entry-condition outcomes; strike and size notes are appended.
pub fn compose_signal(
    snapshot: &MarketSnapshot,
    config: &EngineConfig,
    mut trace: ReasoningTrace,
    strikes: &CondorStrikes,
    size: &PositionSize,
) -> IronCondorSignal {
    let multiplier = config.contract_multiplier;
    let net_credit_per_contract = strikes.net_credit * multiplier;

    trace.push(ConditionResult::pass(Rule::StrikeSelection, strikes.describe()));
    trace.push(ConditionResult::pass(
        Rule::PositionSize,
        format!(
            "{} contract(s) at ${:.2} max risk each; total ${:.2} within ${:.2} budget",
            size.contracts,
            strikes.max_risk_per_contract,
            size.total_max_risk,
            size.max_risk_budget
        ),
    ));

    let expected_move_pct = strikes.expected_move / snapshot.spot * 100.0;
    // Confidence counts structural warnings only; market notes are added after.
    let structural = structure_warnings(strikes, config);
    let risk_level = risk_level(snapshot.vix, strikes.wing_width, strikes.net_credit);
    let confidence = confidence(snapshot.vix, expected_move_pct, structural.len());
    let mut warnings = market_notes(snapshot.vix, expected_move_pct);
    warnings.extend(structural);

    IronCondorSignal {
        symbol: snapshot.symbol.clone(),
        trade_date: snapshot.trade_date,
        expiration: strikes.expiration,
        spot: snapshot.spot,
        vix: snapshot.vix,
        iv_percentile: snapshot.iv_percentile,
        expected_move: strikes.expected_move,
        expected_move_pct,

        long_put_strike: strikes.long_put.strike,
        short_put_strike: strikes.short_put.strike,
        short_call_strike: strikes.short_call.strike,
        long_call_strike: strikes.long_call.strike,
        long_put_premium: strikes.long_put.ask,
        short_put_premium: strikes.short_put.bid,
        short_call_premium: strikes.short_call.bid,
        long_call_premium: strikes.long_call.ask,

        wing_width: strikes.wing_width,
        net_credit: strikes.net_credit,
        net_credit_per_contract,
        max_risk_per_contract: strikes.max_risk_per_contract,
        breakeven_lower: strikes.short_put.strike - strikes.net_credit,
        breakeven_upper: strikes.short_call.strike + strikes.net_credit,

        contracts: size.contracts,
        total_max_risk: size.total_max_risk,
        max_risk_budget: size.max_risk_budget,
        risk_percent: size.risk_percent(config.capital),

        risk_level,
        confidence,
        warnings,
        trace,
    }
}

/// NoSignal for a failed entry rule. The trace already marks the failures.
pub fn compose_no_signal(trace: ReasoningTrace) -> Decision {
    Decision::NoSignal(trace)
}

/// NoSignal for a structure the account cannot afford.
pub fn compose_unaffordable(
    mut trace: ReasoningTrace,
    strikes: &CondorStrikes,
    err: &SizingError,
) -> Decision {
    trace.push(ConditionResult::pass(Rule::StrikeSelection, strikes.describe()));
    trace.push(ConditionResult::fail(Rule::PositionSize, err.to_string()));
    Decision::NoSignal(trace)
}

/// `High` when VIX > 22 or risk/reward > 4, `Medium` when VIX > 18 or
/// risk/reward > 3, else `Low`.
pub fn risk_level(vix: f64, wing_width: f64, net_credit: f64) -> RiskLevel {
    let risk_reward = (wing_width - net_credit) / net_credit;
    if vix > 22.0 || risk_reward > 4.0 {
        RiskLevel::High
    } else if vix > 18.0 || risk_reward > 3.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// `Low` when the expected move exceeds 2% of spot or more than one structural
/// warning was raised, `Medium` on one warning or VIX above 20, else `High`.
pub fn confidence(vix: f64, expected_move_pct: f64, warning_count: usize) -> Confidence {
    if expected_move_pct > WIDE_MOVE_PCT || warning_count > 1 {
        Confidence::Low
    } else if warning_count == 1 || vix > ELEVATED_VIX {
        Confidence::Medium
    } else {
        Confidence::High
    }
}

fn market_notes(vix: f64, expected_move_pct: f64) -> Vec<String> {
    let mut out = Vec::new();
    if vix > ELEVATED_VIX {
        out.push(format!("elevated volatility (VIX {vix:.2})"));
    }
    if expected_move_pct > TIGHT_MOVE_PCT {
        out.push(format!(
            "expected move {expected_move_pct:.2}% of spot; strikes may be tight"
        ));
    }
    out
}

fn structure_warnings(strikes: &CondorStrikes, config: &EngineConfig) -> Vec<String> {
    let mut out = Vec::new();
    if strikes.wing_width > config.wing_width + crate::conditions::liquidity::EPSILON {
        out.push(format!(
            "wing snapped wider: {:.2} points vs configured {:.2}",
            strikes.wing_width, config.wing_width
        ));
    }
    out
}
