//! IV percentile floor — implied volatility must be rich enough to sell.

use crate::config::EngineConfig;
use crate::domain::{ConditionResult, MarketSnapshot, Rule};

use super::Condition;

/// Passes iff `iv_percentile > min_iv_percentile` (strict).
#[derive(Debug, Clone, Copy, Default)]
pub struct IvPercentileFloor;

impl Condition for IvPercentileFloor {
    fn rule(&self) -> Rule {
        Rule::IvPercentile
    }

    fn evaluate(&self, snapshot: &MarketSnapshot, config: &EngineConfig) -> ConditionResult {
        let ivp = snapshot.iv_percentile;
        let min = config.min_iv_percentile;
        if ivp > min {
            ConditionResult::pass(
                self.rule(),
                format!("IV percentile {ivp:.1} above minimum {min:.1}"),
            )
        } else {
            ConditionResult::fail(
                self.rule(),
                format!("IV percentile {ivp:.1} not above minimum {min:.1}"),
            )
        }
    }
}
