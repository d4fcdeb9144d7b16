//! Synthetic market snapshots for dry runs and tests.
//!
//! Builds a seeded, fully deterministic single-expiry chain around a given
//! spot and VIX. Premiums follow a bell curve in distance from spot scaled by
//! the expected move, plus intrinsic value for in-the-money strikes. Quotes
//! carry a small seeded jitter so the chain is not perfectly symmetric.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{expected_move, MarketSnapshot, OptionContract, OptionType};

/// Parameters of a synthetic snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticMarket {
    pub symbol: String,
    pub trade_date: NaiveDate,
    pub spot: f64,
    pub vix: f64,
    pub iv_percentile: f64,
    /// Distance between listed strikes, in points.
    pub strike_step: f64,
    /// Strikes are listed out to this many expected moves either side of spot.
    pub range_moves: f64,
}

impl SyntheticMarket {
    pub fn new(trade_date: NaiveDate, spot: f64, vix: f64, iv_percentile: f64) -> Self {
        Self {
            symbol: "SPY".to_string(),
            trade_date,
            spot,
            vix,
            iv_percentile,
            strike_step: 1.0,
            range_moves: 4.0,
        }
    }

    /// Generate the snapshot. The same seed always yields the same chain.
    pub fn generate(&self, seed: u64) -> MarketSnapshot {
        let mut rng = StdRng::seed_from_u64(seed);
        let em = expected_move(self.spot, self.vix).max(self.strike_step);
        let step = self.strike_step;

        let lo = ((self.spot - self.range_moves * em) / step).floor().max(1.0) as i64;
        let hi = ((self.spot + self.range_moves * em) / step).ceil() as i64;

        let mut chain = Vec::with_capacity(((hi - lo + 1) * 2) as usize);
        for k in lo..=hi {
            let strike = k as f64 * step;
            for option_type in [OptionType::Put, OptionType::Call] {
                chain.push(self.contract(&mut rng, strike, option_type, em));
            }
        }

        MarketSnapshot {
            symbol: self.symbol.clone(),
            trade_date: self.trade_date,
            spot: self.spot,
            vix: self.vix,
            iv_percentile: self.iv_percentile,
            chain,
            events: Vec::new(),
        }
    }

    fn contract(
        &self,
        rng: &mut StdRng,
        strike: f64,
        option_type: OptionType,
        em: f64,
    ) -> OptionContract {
        let intrinsic = match option_type {
            OptionType::Put => (strike - self.spot).max(0.0),
            OptionType::Call => (self.spot - strike).max(0.0),
        };
        let z = (strike - self.spot) / em;
        let extrinsic = 0.4 * em * (-0.5 * z * z).exp();
        let jitter: f64 = rng.gen_range(0.97..1.03);
        let fair = ((intrinsic + extrinsic) * jitter).max(0.01);

        // Every listed strike keeps at least a one-cent bid.
        let half_spread = (fair * 0.03).max(0.01);
        let bid = round_cents((fair - half_spread).max(0.01));
        let ask = round_cents(fair + half_spread).max(round_cents(bid + 0.01));

        // Open interest thins out away from the money.
        let oi_scale = (-0.25 * z * z).exp();
        let open_interest = (rng.gen_range(500.0..5_000.0) * oi_scale) as u64;
        let volume = open_interest / rng.gen_range(2..10);

        OptionContract {
            strike,
            expiration: self.trade_date,
            option_type,
            bid,
            ask,
            open_interest,
            volume,
        }
    }
}

fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
