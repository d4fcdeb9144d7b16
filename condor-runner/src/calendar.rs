//! Economic calendar — heuristic high-impact release dates.
//!
//! - FOMC: configured meeting dates → `FedDecision`
//! - Jobs report: first Friday of the month → `JobsReport`
//! - CPI: Tuesday or Wednesday between the 10th and 15th → `CpiRelease`
//!
//! These are approximations. A snapshot that already lists an event of the
//! same category keeps its own entry.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use condor_core::domain::{EconomicEvent, EventCategory, MarketSnapshot};

use crate::config::CalendarSection;

#[derive(Debug, Clone, Default)]
pub struct EconomicCalendar {
    fomc_dates: BTreeSet<NaiveDate>,
    holidays: BTreeSet<NaiveDate>,
}

impl EconomicCalendar {
    pub fn new(
        fomc_dates: impl IntoIterator<Item = NaiveDate>,
        holidays: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            fomc_dates: fomc_dates.into_iter().collect(),
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn from_config(section: &CalendarSection) -> Self {
        Self::new(
            section.fomc_dates.iter().copied(),
            section.holidays.iter().copied(),
        )
    }

    /// Scheduled high-impact events on `date`.
    pub fn events_on(&self, date: NaiveDate) -> Vec<EconomicEvent> {
        let mut events = Vec::new();
        if self.fomc_dates.contains(&date) {
            events.push(EconomicEvent::new(
                EventCategory::FedDecision,
                "FOMC rate decision",
            ));
        }
        if date.weekday() == Weekday::Fri && date.day() <= 7 {
            events.push(EconomicEvent::new(
                EventCategory::JobsReport,
                "Nonfarm payrolls",
            ));
        }
        if matches!(date.weekday(), Weekday::Tue | Weekday::Wed) && (10..=15).contains(&date.day())
        {
            events.push(EconomicEvent::new(EventCategory::CpiRelease, "CPI (estimated)"));
        }
        events
    }

    /// Weekday that is not a configured exchange holiday.
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.contains(&date)
    }

    /// Add the calendar's events for the snapshot's trade date.
    ///
    /// Returns how many events were added.
    pub fn annotate(&self, snapshot: &mut MarketSnapshot) -> usize {
        let mut added = 0;
        for event in self.events_on(snapshot.trade_date) {
            if snapshot.events.iter().any(|e| e.category == event.category) {
                continue;
            }
            snapshot.events.push(event);
            added += 1;
        }
        added
    }
}
