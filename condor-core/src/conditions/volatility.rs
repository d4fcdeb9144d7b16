//! Volatility band — the volatility index must sit inside the configured band.
//!
//! Below the band there is too little premium to collect; above it the
//! expected move is too large for a same-day structure.

use crate::config::EngineConfig;
use crate::domain::{ConditionResult, MarketSnapshot, Rule};

use super::Condition;

/// Passes iff `vix_min <= vix <= vix_max` (both ends inclusive).
#[derive(Debug, Clone, Copy, Default)]
pub struct VolatilityBand;

impl Condition for VolatilityBand {
    fn rule(&self) -> Rule {
        Rule::VolatilityBand
    }

    fn evaluate(&self, snapshot: &MarketSnapshot, config: &EngineConfig) -> ConditionResult {
        let vix = snapshot.vix;
        if vix > config.vix_max {
            ConditionResult::fail(
                self.rule(),
                format!("VIX {vix:.2} above maximum {:.2}", config.vix_max),
            )
        } else if vix < config.vix_min {
            ConditionResult::fail(
                self.rule(),
                format!(
                    "VIX {vix:.2} below minimum {:.2}, too little premium",
                    config.vix_min
                ),
            )
        } else {
            ConditionResult::pass(
                self.rule(),
                format!(
                    "VIX {vix:.2} within [{:.2}, {:.2}]",
                    config.vix_min, config.vix_max
                ),
            )
        }
    }
}
