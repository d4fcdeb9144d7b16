//! Decision pipeline — validate, evaluate conditions, select strikes, size, compose.
//!
//! ```text
//! config.validate ─► validate_snapshot ─► evaluate_conditions ─┬─ any failed ─► NoSignal
//!                                                               └─ all passed ─► select_strikes
//!                                                                                  └─► size_position
//!                                                                                        ├─ SizingError ─► NoSignal
//!                                                                                        └─ ok ─► Signal
//! ```
//!
//! Pure and synchronous: the same snapshot and config always produce the same
//! `Decision`.

use tracing::info;

use crate::composer::{compose_no_signal, compose_signal, compose_unaffordable};
use crate::conditions::evaluate_conditions;
use crate::config::EngineConfig;
use crate::domain::{Decision, MarketSnapshot};
use crate::error::EngineError;
use crate::sizer::size_position;
use crate::strikes::select_strikes;
use crate::validate::validate_snapshot;

/// Produce exactly one decision for one snapshot.
///
/// Returns `Err` only for fatal input problems (`InvalidConfig`,
/// `InvalidSnapshot`) and unbuildable structures (`NoLiquidStrike`,
/// `InvalidStructure`). Failed entry rules and an unaffordable structure are
/// `Ok(Decision::NoSignal)`.
pub fn evaluate(snapshot: &MarketSnapshot, config: &EngineConfig) -> Result<Decision, EngineError> {
    config.validate()?;
    let snapshot = validate_snapshot(snapshot)?;

    let trace = evaluate_conditions(snapshot, config);
    if !trace.all_passed() {
        let failed: Vec<&str> = trace.failures().map(|r| r.rule.name()).collect();
        info!(
            symbol = %snapshot.symbol,
            trade_date = %snapshot.trade_date,
            failed = ?failed,
            "no signal: entry conditions not met"
        );
        return Ok(compose_no_signal(trace));
    }

    let strikes = select_strikes(snapshot, config)?;

    match size_position(
        config.capital,
        config.max_risk_percent,
        strikes.max_risk_per_contract,
    ) {
        Ok(size) => {
            let signal = compose_signal(snapshot, config, trace, &strikes, &size);
            info!(
                symbol = %signal.symbol,
                trade_date = %signal.trade_date,
                long_put = signal.long_put_strike,
                short_put = signal.short_put_strike,
                short_call = signal.short_call_strike,
                long_call = signal.long_call_strike,
                contracts = signal.contracts,
                net_credit = signal.net_credit,
                "signal: iron condor"
            );
            Ok(Decision::Signal(signal))
        }
        Err(err) => {
            info!(
                symbol = %snapshot.symbol,
                trade_date = %snapshot.trade_date,
                %err,
                "no signal: structure cannot be sized"
            );
            Ok(compose_unaffordable(trace, &strikes, &err))
        }
    }
}
