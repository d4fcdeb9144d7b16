//! Entry conditions — the independent go/no-go rules.
//!
//! Each rule is a named pure predicate over the snapshot and config that
//! produces a `ConditionResult`. The evaluator runs all of them in a fixed
//! order and never short-circuits, so the trace always shows every outcome.

pub mod events;
pub mod iv_percentile;
pub mod liquidity;
pub mod volatility;

pub use events::NoHighImpactEvents;
pub use iv_percentile::IvPercentileFloor;
pub use liquidity::{is_liquid, ChainLiquidity, ShortTarget};
pub use volatility::VolatilityBand;

use crate::config::EngineConfig;
use crate::domain::{ConditionResult, MarketSnapshot, ReasoningTrace, Rule};

/// Trait for entry conditions.
///
/// Conditions see only the snapshot and config. They must not depend on
/// each other's outcomes.
pub trait Condition: Send + Sync {
    /// Which trace step this condition reports as.
    fn rule(&self) -> Rule;

    fn evaluate(&self, snapshot: &MarketSnapshot, config: &EngineConfig) -> ConditionResult;
}

/// The fixed rule set, in evaluation order.
pub static ENTRY_CONDITIONS: [&dyn Condition; 4] = [
    &VolatilityBand,
    &NoHighImpactEvents,
    &IvPercentileFloor,
    &ChainLiquidity,
];

/// Evaluate every entry condition and return the full trace.
///
/// The overall verdict is `trace.all_passed()`.
pub fn evaluate_conditions(snapshot: &MarketSnapshot, config: &EngineConfig) -> ReasoningTrace {
    let mut trace = ReasoningTrace::new();
    for condition in ENTRY_CONDITIONS.iter() {
        let result = condition.evaluate(snapshot, config);
        tracing::debug!(
            rule = %result.rule,
            passed = result.passed,
            reason = %result.reason,
            "entry condition evaluated"
        );
        trace.push(result);
    }
    trace
}
