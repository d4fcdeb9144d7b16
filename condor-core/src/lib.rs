//! Condor Core — the deterministic iron-condor signal decision engine.
//!
//! Given one day's `MarketSnapshot` and an `EngineConfig`, produces exactly
//! one `Decision`:
//! - Snapshot validation (fatal `InvalidSnapshot` on malformed input)
//! - Four independent entry conditions, always all evaluated
//! - Strike selection around the one-day expected move
//! - Position sizing against the per-trade risk budget
//! - Signal composition with the full reasoning trace
//!
//! The engine is pure: no I/O, no clock, no shared state.

pub mod composer;
pub mod conditions;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod sizer;
pub mod strikes;
pub mod synthetic;
pub mod validate;

pub use config::{ConfigError, EngineConfig, LiquidityThresholds, TieBreak};
pub use domain::{Decision, IronCondorSignal, MarketSnapshot, ReasoningTrace};
pub use engine::evaluate;
pub use error::EngineError;
pub use fingerprint::DecisionFingerprint;
