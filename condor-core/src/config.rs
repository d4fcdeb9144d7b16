//! Engine configuration — account risk policy, entry thresholds, strike placement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::EventCategory;

/// An engine configuration that cannot be evaluated against.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("capital must be > 0 (got {0})")]
    Capital(f64),
    #[error("max_risk_percent must be in (0, 100] (got {0})")]
    MaxRiskPercent(f64),
    #[error("volatility band [{min}, {max}] is empty or negative")]
    VixBand { min: f64, max: f64 },
    #[error("min_iv_percentile must be in [0, 100] (got {0})")]
    IvPercentile(f64),
    #[error("{field} must be > 0 (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be >= 0 (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Which candidate wins when two strikes are equally close to a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Prefer the strike farther from spot (wider cushion).
    #[default]
    Farther,
    /// Prefer the strike nearer to spot (more credit).
    Nearer,
}

/// Liquidity requirements a short-leg contract must meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidityThresholds {
    pub min_open_interest: u64,
    /// Maximum `(ask - bid) / mid`.
    pub max_spread_fraction: f64,
}

impl Default for LiquidityThresholds {
    fn default() -> Self {
        Self {
            min_open_interest: 100,
            max_spread_fraction: 0.15,
        }
    }
}

/// Complete configuration for one engine invocation.
///
/// Defaults reproduce the production account: $5,000 capital, 2% risk per
/// trade, VIX band 12–25, IV percentile above 20, $2 wings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub capital: f64,
    pub max_risk_percent: f64,
    pub vix_min: f64,
    pub vix_max: f64,
    pub min_iv_percentile: f64,
    pub liquidity: LiquidityThresholds,
    /// Distance from short to long strike, in points.
    pub wing_width: f64,
    /// Short-strike distance from spot, as a multiple of the expected move.
    pub cushion: f64,
    /// Half-width of the strike search window around each short target,
    /// as a multiple of the expected move.
    pub search_window_moves: f64,
    pub tie_break: TieBreak,
    /// Shares per contract.
    pub contract_multiplier: f64,
    pub high_impact_events: Vec<EventCategory>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capital: 5_000.0,
            max_risk_percent: 2.0,
            vix_min: 12.0,
            vix_max: 25.0,
            min_iv_percentile: 20.0,
            liquidity: LiquidityThresholds::default(),
            wing_width: 2.0,
            cushion: 1.5,
            search_window_moves: 1.0,
            tie_break: TieBreak::Farther,
            contract_multiplier: 100.0,
            high_impact_events: EventCategory::default_high_impact(),
        }
    }
}

impl EngineConfig {
    /// Dollar budget at risk for a single trade.
    pub fn max_risk_budget(&self) -> f64 {
        self.capital * self.max_risk_percent / 100.0
    }

    pub fn is_high_impact(&self, category: &EventCategory) -> bool {
        self.high_impact_events.contains(category)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.capital.is_finite() && self.capital > 0.0) {
            return Err(ConfigError::Capital(self.capital));
        }
        if !(self.max_risk_percent > 0.0 && self.max_risk_percent <= 100.0) {
            return Err(ConfigError::MaxRiskPercent(self.max_risk_percent));
        }
        if !(self.vix_min >= 0.0 && self.vix_min <= self.vix_max && self.vix_max.is_finite()) {
            return Err(ConfigError::VixBand {
                min: self.vix_min,
                max: self.vix_max,
            });
        }
        if !(0.0..=100.0).contains(&self.min_iv_percentile) {
            return Err(ConfigError::IvPercentile(self.min_iv_percentile));
        }
        positive("wing_width", self.wing_width)?;
        positive("search_window_moves", self.search_window_moves)?;
        positive("contract_multiplier", self.contract_multiplier)?;
        non_negative("cushion", self.cushion)?;
        non_negative("liquidity.max_spread_fraction", self.liquidity.max_spread_fraction)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn budget_is_percent_of_capital() {
        let config = EngineConfig::default();
        assert!((config.max_risk_budget() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_capital() {
        let config = EngineConfig {
            capital: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Capital(0.0)));
    }

    #[test]
    fn risk_percent_bounds() {
        let mut config = EngineConfig::default();
        config.max_risk_percent = 100.0;
        assert!(config.validate().is_ok());
        config.max_risk_percent = 100.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxRiskPercent(_))
        ));
        config.max_risk_percent = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxRiskPercent(_))
        ));
    }

    #[test]
    fn inverted_vix_band_rejected() {
        let config = EngineConfig {
            vix_min: 30.0,
            vix_max: 20.0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::VixBand { .. })));
    }

    #[test]
    fn zero_width_rejected() {
        let config = EngineConfig {
            wing_width: 0.0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "wing_width",
                value: 0.0
            })
        );
    }

    #[test]
    fn default_high_impact_set() {
        let config = EngineConfig::default();
        assert!(config.is_high_impact(&EventCategory::FedDecision));
        assert!(config.is_high_impact(&EventCategory::CpiRelease));
        assert!(config.is_high_impact(&EventCategory::JobsReport));
        assert!(!config.is_high_impact(&EventCategory::Earnings));
    }

    #[test]
    fn tie_break_defaults_to_farther() {
        assert_eq!(TieBreak::default(), TieBreak::Farther);
        let t: TieBreak = serde_json::from_str("\"nearer\"").unwrap();
        assert_eq!(t, TieBreak::Nearer);
    }
}
