//! Option contracts — one row of the day's option chain.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Put or call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Put,
    Call,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Put => write!(f, "put"),
            OptionType::Call => write!(f, "call"),
        }
    }
}

/// A single listed option contract with its top-of-book quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub strike: f64,
    pub expiration: NaiveDate,
    pub option_type: OptionType,
    pub bid: f64,
    pub ask: f64,
    pub open_interest: u64,
    pub volume: u64,
}

impl OptionContract {
    /// Midpoint of bid and ask.
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    /// Bid-ask spread as a fraction of mid. `None` when mid is not positive.
    pub fn spread_fraction(&self) -> Option<f64> {
        let mid = self.mid();
        if mid > 0.0 {
            Some((self.ask - self.bid) / mid)
        } else {
            None
        }
    }

    /// True if the quote is usable: finite, non-negative, and not crossed.
    pub fn has_sane_quote(&self) -> bool {
        self.bid.is_finite() && self.ask.is_finite() && self.bid >= 0.0 && self.ask >= self.bid
    }

    /// Returns true if the contract sits on the out-of-the-money side of `spot`.
    ///
    /// Puts must strike strictly below spot, calls strictly above.
    pub fn is_otm(&self, spot: f64) -> bool {
        match self.option_type {
            OptionType::Put => self.strike < spot,
            OptionType::Call => self.strike > spot,
        }
    }
}
