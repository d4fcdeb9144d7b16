//! Position sizer — whole contracts within the per-trade risk budget.
//!
//! # Formula
//! ```text
//! max_risk_budget = capital * max_risk_percent / 100
//! contracts       = floor(max_risk_budget / max_risk_per_contract)
//! ```
//!
//! # Example
//! - Capital: $5,000, risk 2% → budget $100
//! - Max risk per contract: $84
//! - Contracts: floor(100 / 84) = 1, total risk $84

use thiserror::Error;

/// Tolerance so that an exact budget multiple is not lost to float rounding.
const FLOOR_EPSILON: f64 = 1e-9;

/// The structure is valid but cannot be sized under the risk policy.
///
/// Reported as `Decision::NoSignal`, never as a fatal error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error(
        "risk per contract exceeds allowed budget (${risk_per_contract:.2} per contract > ${budget:.2} budget)"
    )]
    CapitalTooLow { budget: f64, risk_per_contract: f64 },

    #[error("position of {contracts} contracts exceeds the {limit} contract limit")]
    ContractLimit { contracts: f64, limit: u32 },
}

/// Result of sizing a structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSize {
    pub contracts: u32,
    pub max_risk_budget: f64,
    pub total_max_risk: f64,
}

impl PositionSize {
    /// Share of capital actually put at risk, in percent.
    pub fn risk_percent(&self, capital: f64) -> f64 {
        self.total_max_risk / capital * 100.0
    }
}

pub fn size_position(
    capital: f64,
    max_risk_percent: f64,
    max_risk_per_contract: f64,
) -> Result<PositionSize, SizingError> {
    let budget = capital * max_risk_percent / 100.0;
    let raw = (budget / max_risk_per_contract + FLOOR_EPSILON).floor();

    if !(raw >= 1.0) {
        return Err(SizingError::CapitalTooLow {
            budget,
            risk_per_contract: max_risk_per_contract,
        });
    }

    if raw > f64::from(u32::MAX) {
        return Err(SizingError::ContractLimit {
            contracts: raw,
            limit: u32::MAX,
        });
    }

    let contracts = raw as u32;
    Ok(PositionSize {
        contracts,
        max_risk_budget: budget,
        total_max_risk: f64::from(contracts) * max_risk_per_contract,
    })
}
