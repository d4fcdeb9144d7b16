//! Chain liquidity — each side needs a tradeable short strike near its target.
//!
//! The expected trading range of a side is the strike search window around
//! that side's short target (`spot ∓ cushion × expected move`, half-width
//! `search_window_moves × expected move`). The strike selector searches the
//! same window, so this rule and strike selection agree on what is liquid.

use crate::config::{EngineConfig, LiquidityThresholds};
use crate::domain::{ConditionResult, MarketSnapshot, OptionContract, OptionType, Rule};
use chrono::NaiveDate;

use super::Condition;

/// Tolerance for float comparisons against strikes and spread thresholds.
pub(crate) const EPSILON: f64 = 1e-9;

/// A contract is liquid when it has a bid, enough open interest, and a
/// spread no wider than the configured fraction of mid.
pub fn is_liquid(contract: &OptionContract, thresholds: &LiquidityThresholds) -> bool {
    contract.bid > 0.0
        && contract.open_interest >= thresholds.min_open_interest
        && contract
            .spread_fraction()
            .is_some_and(|f| f <= thresholds.max_spread_fraction + EPSILON)
}

/// Target placement and search window for one short leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortTarget {
    pub side: OptionType,
    pub target: f64,
    pub window: f64,
}

impl ShortTarget {
    pub fn new(side: OptionType, spot: f64, expected_move: f64, config: &EngineConfig) -> Self {
        let offset = config.cushion * expected_move;
        let target = match side {
            OptionType::Put => spot - offset,
            OptionType::Call => spot + offset,
        };
        Self {
            side,
            target,
            window: config.search_window_moves * expected_move,
        }
    }

    pub fn for_snapshot(snapshot: &MarketSnapshot, config: &EngineConfig, side: OptionType) -> Self {
        Self::new(side, snapshot.spot, snapshot.expected_move(), config)
    }

    pub fn lower(&self) -> f64 {
        self.target - self.window
    }

    pub fn upper(&self) -> f64 {
        self.target + self.window
    }

    pub fn in_window(&self, strike: f64) -> bool {
        (strike - self.target).abs() <= self.window + EPSILON
    }

    /// Liquid, out-of-the-money contracts of this side inside the window.
    pub fn candidates<'a>(
        &self,
        snapshot: &'a MarketSnapshot,
        expiration: NaiveDate,
        config: &EngineConfig,
    ) -> Vec<&'a OptionContract> {
        snapshot
            .contracts(expiration, self.side)
            .filter(|c| {
                c.is_otm(snapshot.spot)
                    && self.in_window(c.strike)
                    && is_liquid(c, &config.liquidity)
            })
            .collect()
    }
}

/// Passes iff both the put and the call side have at least one liquid
/// short candidate at the trading expiration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainLiquidity;

impl Condition for ChainLiquidity {
    fn rule(&self) -> Rule {
        Rule::ChainLiquidity
    }

    fn evaluate(&self, snapshot: &MarketSnapshot, config: &EngineConfig) -> ConditionResult {
        let Some(expiration) = snapshot.trading_expiration() else {
            return ConditionResult::fail(self.rule(), "no unexpired contracts in chain");
        };

        let mut parts = Vec::with_capacity(2);
        let mut missing = Vec::new();
        for side in [OptionType::Put, OptionType::Call] {
            let target = ShortTarget::for_snapshot(snapshot, config, side);
            let count = target.candidates(snapshot, expiration, config).len();
            let range = format!("[{:.2}, {:.2}]", target.lower(), target.upper());
            if count == 0 {
                missing.push(format!("no liquid {side} strike within {range}"));
            } else {
                parts.push(format!("{count} liquid {side}(s) within {range}"));
            }
        }

        if missing.is_empty() {
            ConditionResult::pass(
                self.rule(),
                format!("{} (exp {expiration})", parts.join("; ")),
            )
        } else {
            ConditionResult::fail(
                self.rule(),
                format!(
                    "{} (min OI {}, max spread {:.0}% of mid)",
                    missing.join("; "),
                    config.liquidity.min_open_interest,
                    config.liquidity.max_spread_fraction * 100.0
                ),
            )
        }
    }
}
