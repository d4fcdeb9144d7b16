//! Fatal engine errors.
//!
//! These mean no decision could be reached at all. A rejected trade is never
//! an error: it is `Decision::NoSignal`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::OptionType;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("no liquid {side} strike for {leg} leg near {target:.2}")]
    NoLiquidStrike {
        side: OptionType,
        leg: Leg,
        target: f64,
    },
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

/// Which of the two legs on a side a strike belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Short,
    Long,
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Leg::Short => write!(f, "short"),
            Leg::Long => write!(f, "long"),
        }
    }
}
