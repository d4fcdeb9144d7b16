//! Event calendar — no trade on days with a high-impact scheduled release.

use crate::config::EngineConfig;
use crate::domain::{ConditionResult, MarketSnapshot, Rule};

use super::Condition;

/// Passes iff no event in the snapshot carries a configured high-impact category.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighImpactEvents;

impl Condition for NoHighImpactEvents {
    fn rule(&self) -> Rule {
        Rule::EventCalendar
    }

    fn evaluate(&self, snapshot: &MarketSnapshot, config: &EngineConfig) -> ConditionResult {
        let blocking: Vec<String> = snapshot
            .events
            .iter()
            .filter(|e| config.is_high_impact(&e.category))
            .map(|e| {
                if e.title.is_empty() {
                    e.category.to_string()
                } else {
                    format!("{} ({})", e.category, e.title)
                }
            })
            .collect();

        if blocking.is_empty() {
            let reason = if snapshot.events.is_empty() {
                "no scheduled events".to_string()
            } else {
                format!(
                    "{} scheduled event(s), none high-impact",
                    snapshot.events.len()
                )
            };
            ConditionResult::pass(self.rule(), reason)
        } else {
            ConditionResult::fail(
                self.rule(),
                format!("high-impact event today: {}", blocking.join(", ")),
            )
        }
    }
}
