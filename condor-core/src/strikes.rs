//! Strike selection — places the four legs of the iron condor.
//!
//! # Algorithm
//! ```text
//! expected_move = spot * (vix / 100) * sqrt(1 / 365)
//! short targets = spot ∓ cushion * expected_move
//! short strike  = liquid OTM strike closest to target, within ± window
//! long strike   = nearest listed strike at or beyond short ∓ wing_width
//! net credit    = (short put bid − long put ask) + (short call bid − long call ask)
//! max risk      = (max(put wing, call wing) − net credit) * multiplier
//! ```
//!
//! All legs come from the trading expiration (earliest on or after the trade date).

use chrono::NaiveDate;

use crate::conditions::liquidity::EPSILON;
use crate::conditions::ShortTarget;
use crate::config::{EngineConfig, TieBreak};
use crate::domain::{MarketSnapshot, OptionContract, OptionType};
use crate::error::{EngineError, Leg};

/// The four selected contracts and the structure's per-contract economics.
#[derive(Debug, Clone, PartialEq)]
pub struct CondorStrikes {
    pub expiration: NaiveDate,
    pub expected_move: f64,
    pub put_target: ShortTarget,
    pub call_target: ShortTarget,
    pub long_put: OptionContract,
    pub short_put: OptionContract,
    pub short_call: OptionContract,
    pub long_call: OptionContract,
    /// Credit per share, shorts at bid and longs at ask.
    pub net_credit: f64,
    /// Wider of the two realised wings, in points.
    pub wing_width: f64,
    /// Dollars at risk per contract.
    pub max_risk_per_contract: f64,
}

impl CondorStrikes {
    pub fn put_credit(&self) -> f64 {
        self.short_put.bid - self.long_put.ask
    }

    pub fn call_credit(&self) -> f64 {
        self.short_call.bid - self.long_call.ask
    }

    pub fn put_wing(&self) -> f64 {
        self.short_put.strike - self.long_put.strike
    }

    pub fn call_wing(&self) -> f64 {
        self.long_call.strike - self.short_call.strike
    }

    /// One-line derivation note for the reasoning trace.
    pub fn describe(&self) -> String {
        format!(
            "exp {}; expected move {:.2}; short put {} (target {:.2}) / long put {}; \
             short call {} (target {:.2}) / long call {}; credit {:.2} (put {:.2} + call {:.2}); \
             wing {:.2}",
            self.expiration,
            self.expected_move,
            self.short_put.strike,
            self.put_target.target,
            self.long_put.strike,
            self.short_call.strike,
            self.call_target.target,
            self.long_call.strike,
            self.net_credit,
            self.put_credit(),
            self.call_credit(),
            self.wing_width,
        )
    }
}

/// Select strikes for a snapshot whose entry conditions all passed.
pub fn select_strikes(
    snapshot: &MarketSnapshot,
    config: &EngineConfig,
) -> Result<CondorStrikes, EngineError> {
    let expiration = snapshot.trading_expiration().ok_or_else(|| {
        EngineError::InvalidSnapshot(format!(
            "no contract expires on or after {}",
            snapshot.trade_date
        ))
    })?;
    let expected_move = snapshot.expected_move();

    let put_target = ShortTarget::new(OptionType::Put, snapshot.spot, expected_move, config);
    let call_target = ShortTarget::new(OptionType::Call, snapshot.spot, expected_move, config);

    let short_put = snap_short(snapshot, expiration, &put_target, config)?;
    let short_call = snap_short(snapshot, expiration, &call_target, config)?;
    let long_put = snap_long(snapshot, expiration, short_put, config.wing_width)?;
    let long_call = snap_long(snapshot, expiration, short_call, config.wing_width)?;

    tracing::debug!(
        %expiration,
        expected_move,
        short_put = short_put.strike,
        long_put = long_put.strike,
        short_call = short_call.strike,
        long_call = long_call.strike,
        "strikes selected"
    );

    let net_credit = (short_put.bid - long_put.ask) + (short_call.bid - long_call.ask);
    let wing_width = (short_put.strike - long_put.strike).max(long_call.strike - short_call.strike);

    if net_credit <= 0.0 {
        return Err(EngineError::InvalidStructure(format!(
            "net credit {net_credit:.2} is not positive (shorts {}/{}, longs {}/{})",
            short_put.strike, short_call.strike, long_put.strike, long_call.strike
        )));
    }
    let max_risk_per_contract = (wing_width - net_credit) * config.contract_multiplier;
    if max_risk_per_contract <= 0.0 {
        return Err(EngineError::InvalidStructure(format!(
            "max risk per contract {max_risk_per_contract:.2} is not positive \
             (wing {wing_width:.2}, credit {net_credit:.2})"
        )));
    }

    Ok(CondorStrikes {
        expiration,
        expected_move,
        put_target,
        call_target,
        long_put: long_put.clone(),
        short_put: short_put.clone(),
        short_call: short_call.clone(),
        long_call: long_call.clone(),
        net_credit,
        wing_width,
        max_risk_per_contract,
    })
}

fn snap_short<'a>(
    snapshot: &'a MarketSnapshot,
    expiration: NaiveDate,
    target: &ShortTarget,
    config: &EngineConfig,
) -> Result<&'a OptionContract, EngineError> {
    let candidates = target.candidates(snapshot, expiration, config);
    closest_to_target(&candidates, target.target, snapshot.spot, config.tie_break).ok_or(
        EngineError::NoLiquidStrike {
            side: target.side,
            leg: Leg::Short,
            target: target.target,
        },
    )
}

/// Pick the candidate closest to `target`; equal distances go to `tie_break`.
///
/// Equal strikes keep chain order (first wins).
pub fn closest_to_target<'a>(
    candidates: &[&'a OptionContract],
    target: f64,
    spot: f64,
    tie_break: TieBreak,
) -> Option<&'a OptionContract> {
    candidates.iter().copied().reduce(|best, c| {
        let d_best = (best.strike - target).abs();
        let d_c = (c.strike - target).abs();
        if (d_c - d_best).abs() > EPSILON {
            return if d_c < d_best { c } else { best };
        }
        let f_best = (best.strike - spot).abs();
        let f_c = (c.strike - spot).abs();
        let c_wins = match tie_break {
            TieBreak::Farther => f_c > f_best + EPSILON,
            TieBreak::Nearer => f_c + EPSILON < f_best,
        };
        if c_wins {
            c
        } else {
            best
        }
    })
}

/// Nearest listed strike with a bid at or beyond `short ∓ width`.
fn snap_long<'a>(
    snapshot: &'a MarketSnapshot,
    expiration: NaiveDate,
    short: &OptionContract,
    width: f64,
) -> Result<&'a OptionContract, EngineError> {
    let side = short.option_type;
    let contracts = snapshot
        .contracts(expiration, side)
        .filter(|c| c.bid > 0.0);
    let (offset, chosen) = match side {
        OptionType::Put => {
            let offset = short.strike - width;
            let chosen = contracts
                .filter(|c| c.strike <= offset + EPSILON)
                .reduce(|best, c| if c.strike > best.strike { c } else { best });
            (offset, chosen)
        }
        OptionType::Call => {
            let offset = short.strike + width;
            let chosen = contracts
                .filter(|c| c.strike >= offset - EPSILON)
                .reduce(|best, c| if c.strike < best.strike { c } else { best });
            (offset, chosen)
        }
    };
    chosen.ok_or(EngineError::NoLiquidStrike {
        side,
        leg: Leg::Long,
        target: offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    fn contract(option_type: OptionType, strike: f64, bid: f64, ask: f64) -> OptionContract {
        OptionContract {
            strike,
            expiration: date(),
            option_type,
            bid,
            ask,
            open_interest: 1_000,
            volume: 100,
        }
    }

    /// Dense $1 chain from 430 to 470 with premiums decaying away from spot.
    fn dense_chain(spot: f64) -> Vec<OptionContract> {
        let mut chain = Vec::new();
        for k in 430..=470 {
            let strike = f64::from(k);
            let distance = (strike - spot).abs();
            let bid = (2.0 - 0.15 * distance).max(0.05);
            let bid = (bid * 100.0).round() / 100.0;
            chain.push(contract(OptionType::Put, strike, bid, bid + 0.02));
            chain.push(contract(OptionType::Call, strike, bid, bid + 0.02));
        }
        chain
    }

    fn snapshot(chain: Vec<OptionContract>) -> MarketSnapshot {
        MarketSnapshot {
            symbol: "SPY".into(),
            trade_date: date(),
            spot: 450.0,
            vix: 18.0,
            iv_percentile: 35.0,
            chain,
            events: vec![],
        }
    }

    #[test]
    fn selects_ordered_strikes_near_targets() {
        let snap = snapshot(dense_chain(450.0));
        let s = select_strikes(&snap, &EngineConfig::default()).unwrap();
        // Targets ≈ 443.64 / 456.36 → nearest $1 strikes 444 / 456.
        assert_eq!(s.short_put.strike, 444.0);
        assert_eq!(s.short_call.strike, 456.0);
        assert_eq!(s.long_put.strike, 442.0);
        assert_eq!(s.long_call.strike, 458.0);
        assert_eq!(s.expiration, date());
        assert!((s.wing_width - 2.0).abs() < 1e-12);
    }

    #[test]
    fn credit_uses_short_bid_and_long_ask() {
        let snap = snapshot(dense_chain(450.0));
        let s = select_strikes(&snap, &EngineConfig::default()).unwrap();
        let expected = (s.short_put.bid - s.long_put.ask) + (s.short_call.bid - s.long_call.ask);
        assert!((s.net_credit - expected).abs() < 1e-12);
        assert!((s.max_risk_per_contract - (2.0 - expected) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn tie_break_farther_and_nearer() {
        let a = contract(OptionType::Put, 443.0, 1.0, 1.1);
        let b = contract(OptionType::Put, 444.0, 1.0, 1.1);
        let candidates = vec![&b, &a];
        // Target exactly between: 443.5.
        let far = closest_to_target(&candidates, 443.5, 450.0, TieBreak::Farther).unwrap();
        assert_eq!(far.strike, 443.0);
        let near = closest_to_target(&candidates, 443.5, 450.0, TieBreak::Nearer).unwrap();
        assert_eq!(near.strike, 444.0);
    }

    #[test]
    fn tie_break_farther_on_call_side() {
        let a = contract(OptionType::Call, 456.0, 1.0, 1.1);
        let b = contract(OptionType::Call, 457.0, 1.0, 1.1);
        let candidates = vec![&a, &b];
        let far = closest_to_target(&candidates, 456.5, 450.0, TieBreak::Farther).unwrap();
        assert_eq!(far.strike, 457.0);
    }

    #[test]
    fn long_leg_snaps_outward_when_offset_missing() {
        let mut chain = dense_chain(450.0);
        // Remove the exact $2 wings; next listed strikes are 441 and 459.
        chain.retain(|c| !(c.strike == 442.0 && c.option_type == OptionType::Put));
        chain.retain(|c| !(c.strike == 458.0 && c.option_type == OptionType::Call));
        let s = select_strikes(&snapshot(chain), &EngineConfig::default()).unwrap();
        assert_eq!(s.long_put.strike, 441.0);
        assert_eq!(s.long_call.strike, 459.0);
        assert!((s.wing_width - 3.0).abs() < 1e-12);
    }

    #[test]
    fn no_long_strike_beyond_offset_fails() {
        let chain: Vec<OptionContract> = dense_chain(450.0)
            .into_iter()
            .filter(|c| c.option_type == OptionType::Call || c.strike >= 443.0)
            .collect();
        let err = select_strikes(&snapshot(chain), &EngineConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::NoLiquidStrike {
                side: OptionType::Put,
                leg: Leg::Long,
                target: 442.0
            }
        );
    }

    #[test]
    fn illiquid_window_fails_short_leg() {
        let mut chain = dense_chain(450.0);
        for c in chain.iter_mut() {
            if c.option_type == OptionType::Call {
                c.open_interest = 0;
            }
        }
        let err = select_strikes(&snapshot(chain), &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::NoLiquidStrike {
                side: OptionType::Call,
                leg: Leg::Short,
                ..
            }
        ));
    }

    #[test]
    fn zero_bid_long_is_skipped() {
        let mut chain = dense_chain(450.0);
        for c in chain.iter_mut() {
            if c.option_type == OptionType::Put && c.strike == 442.0 {
                c.bid = 0.0;
            }
        }
        let s = select_strikes(&snapshot(chain), &EngineConfig::default()).unwrap();
        assert_eq!(s.long_put.strike, 441.0);
    }

    #[test]
    fn non_positive_credit_is_invalid_structure() {
        let chain = vec![
            contract(OptionType::Put, 444.0, 0.10, 0.11),
            contract(OptionType::Put, 442.0, 0.50, 0.60),
            contract(OptionType::Call, 456.0, 0.10, 0.11),
            contract(OptionType::Call, 458.0, 0.50, 0.60),
        ];
        let err = select_strikes(&snapshot(chain), &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidStructure(_)));
    }

    #[test]
    fn credit_wider_than_wing_is_invalid_structure() {
        let chain = vec![
            contract(OptionType::Put, 444.0, 1.60, 1.70),
            contract(OptionType::Put, 442.0, 0.05, 0.06),
            contract(OptionType::Call, 456.0, 1.60, 1.70),
            contract(OptionType::Call, 458.0, 0.05, 0.06),
        ];
        let config = EngineConfig {
            liquidity: crate::config::LiquidityThresholds {
                min_open_interest: 0,
                max_spread_fraction: 1.0,
            },
            ..EngineConfig::default()
        };
        let err = select_strikes(&snapshot(chain), &config).unwrap_err();
        match err {
            EngineError::InvalidStructure(reason) => assert!(reason.contains("max risk")),
            other => panic!("expected InvalidStructure, got {other:?}"),
        }
    }

    #[test]
    fn ignores_later_expirations() {
        let mut chain = dense_chain(450.0);
        let later = date().succ_opt().unwrap();
        chain.push(OptionContract {
            expiration: later,
            ..contract(OptionType::Put, 443.64, 5.0, 5.01)
        });
        let s = select_strikes(&snapshot(chain), &EngineConfig::default()).unwrap();
        assert_eq!(s.short_put.strike, 444.0);
        assert_eq!(s.short_put.expiration, date());
    }
}
