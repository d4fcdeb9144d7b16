//! Snapshot integrity gate.
//!
//! Not a trading rule: a snapshot that fails here cannot be reasoned about,
//! so the run ends with `EngineError::InvalidSnapshot` instead of a decision.

use crate::domain::MarketSnapshot;
use crate::error::EngineError;

/// Upper bound accepted for the volatility index level.
pub const MAX_VIX: f64 = 200.0;

/// Returns the snapshot unchanged if it is complete and sane.
pub fn validate_snapshot(snapshot: &MarketSnapshot) -> Result<&MarketSnapshot, EngineError> {
    if !(snapshot.spot.is_finite() && snapshot.spot > 0.0) {
        return Err(invalid(format!("spot price must be > 0 (got {})", snapshot.spot)));
    }
    if !(snapshot.vix > 0.0 && snapshot.vix <= MAX_VIX) {
        return Err(invalid(format!(
            "volatility index must be in (0, {MAX_VIX}] (got {})",
            snapshot.vix
        )));
    }
    if !(0.0..=100.0).contains(&snapshot.iv_percentile) {
        return Err(invalid(format!(
            "IV percentile must be in [0, 100] (got {})",
            snapshot.iv_percentile
        )));
    }
    if snapshot.chain.is_empty() {
        return Err(invalid("option chain is empty".to_string()));
    }
    for (i, contract) in snapshot.chain.iter().enumerate() {
        if !(contract.strike.is_finite() && contract.strike > 0.0) {
            return Err(invalid(format!(
                "contract #{i}: strike must be > 0 (got {})",
                contract.strike
            )));
        }
        if !contract.has_sane_quote() {
            return Err(invalid(format!(
                "contract #{i} ({} {}): quote must satisfy ask >= bid >= 0 (bid {}, ask {})",
                contract.option_type, contract.strike, contract.bid, contract.ask
            )));
        }
    }
    if snapshot.trading_expiration().is_none() {
        return Err(invalid(format!(
            "no contract expires on or after {}",
            snapshot.trade_date
        )));
    }
    Ok(snapshot)
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidSnapshot(reason)
}
