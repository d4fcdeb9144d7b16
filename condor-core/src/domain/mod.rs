//! Domain types for the condor decision engine

pub mod decision;
pub mod option;
pub mod snapshot;

pub use decision::{
    Confidence, ConditionResult, Decision, IronCondorSignal, ReasoningTrace, RiskLevel, Rule,
};
pub use option::{OptionContract, OptionType};
pub use snapshot::{expected_move, EconomicEvent, EventCategory, MarketSnapshot};
