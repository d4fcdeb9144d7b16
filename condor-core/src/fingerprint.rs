//! Input fingerprinting — deterministic identity of one engine invocation.
//!
//! The fingerprint is a BLAKE3 hash over the canonical JSON of the snapshot
//! and the config. Struct fields serialize in declaration order, so identical
//! inputs always hash identically. The runner uses it to make re-running the
//! same day's job a no-op in the decision history.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EngineConfig;
use crate::domain::MarketSnapshot;

#[derive(Serialize)]
struct Canonical<'a> {
    snapshot: &'a MarketSnapshot,
    config: &'a EngineConfig,
}

/// Hex-encoded BLAKE3 digest of an engine input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionFingerprint(pub String);

impl DecisionFingerprint {
    pub fn of(
        snapshot: &MarketSnapshot,
        config: &EngineConfig,
    ) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_vec(&Canonical { snapshot, config })?;
        Ok(Self(blake3::hash(&json).to_hex().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for DecisionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
