//! Property tests for decision invariants.
//!
//! Uses proptest to verify:
//! 1. VIX outside the band → NoSignal with the volatility rule failed
//! 2. Any high-impact event → NoSignal with the event rule failed
//! 3. Synthetic chains always yield a decision, and every signal has ordered
//!    strikes taken from the chain and ≥ 1 contract
//! 4. Idempotence: identical input yields an identical decision

use chrono::NaiveDate;
use proptest::prelude::*;
use condor_core::domain::{Decision, EconomicEvent, EventCategory, MarketSnapshot, Rule};
use condor_core::synthetic::SyntheticMarket;
use condor_core::{evaluate, EngineConfig};

// ── Strategies (proptest) ────────────────────────────────────────────

fn trade_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
}

fn arb_spot() -> impl Strategy<Value = f64> {
    (100.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_vix_outside_band() -> impl Strategy<Value = f64> {
    prop_oneof![0.5..11.99_f64, 25.01..199.0_f64]
}

fn arb_high_impact() -> impl Strategy<Value = EventCategory> {
    prop_oneof![
        Just(EventCategory::FedDecision),
        Just(EventCategory::CpiRelease),
        Just(EventCategory::JobsReport),
    ]
}

fn arb_other_event() -> impl Strategy<Value = EventCategory> {
    prop_oneof![
        Just(EventCategory::Earnings),
        Just(EventCategory::Gdp),
        "[A-Z]{3,6}".prop_map(EventCategory::Other),
    ]
}

fn synthetic(spot: f64, vix: f64, iv_percentile: f64, seed: u64) -> MarketSnapshot {
    SyntheticMarket::new(trade_date(), spot, vix, iv_percentile).generate(seed)
}

// ── 1. Volatility band ───────────────────────────────────────────────

proptest! {
    #[test]
    fn vix_outside_band_is_no_signal(
        spot in arb_spot(),
        vix in arb_vix_outside_band(),
        seed in any::<u64>(),
    ) {
        let snap = synthetic(spot, vix, 50.0, seed);
        let decision = evaluate(&snap, &EngineConfig::default()).unwrap();
        prop_assert!(!decision.is_signal());
        prop_assert!(decision.trace().failed(Rule::VolatilityBand));
        prop_assert_eq!(decision.trace().len(), 4);
    }
}

// ── 2. Event calendar ────────────────────────────────────────────────

proptest! {
    #[test]
    fn high_impact_event_is_no_signal(
        spot in arb_spot(),
        vix in 12.0..25.0_f64,
        blocking in arb_high_impact(),
        others in prop::collection::vec(arb_other_event(), 0..3),
        seed in any::<u64>(),
    ) {
        let mut snap = synthetic(spot, vix, 50.0, seed);
        snap.events = others.into_iter().map(|c| EconomicEvent::new(c, "")).collect();
        snap.events.push(EconomicEvent::new(blocking, ""));

        let decision = evaluate(&snap, &EngineConfig::default()).unwrap();
        prop_assert!(!decision.is_signal());
        prop_assert!(decision.trace().failed(Rule::EventCalendar));
    }

    #[test]
    fn low_impact_events_never_block(
        others in prop::collection::vec(arb_other_event(), 1..4),
        seed in any::<u64>(),
    ) {
        let mut snap = synthetic(450.0, 18.0, 50.0, seed);
        snap.events = others.into_iter().map(|c| EconomicEvent::new(c, "")).collect();

        let decision = evaluate(&snap, &EngineConfig::default());
        prop_assert!(decision.is_ok(), "{:?}", decision);
        prop_assert!(!decision.unwrap().trace().failed(Rule::EventCalendar));
    }
}

// ── 3. Signal structure ──────────────────────────────────────────────

proptest! {
    #[test]
    fn signals_are_well_formed(
        spot in arb_spot(),
        vix in 12.0..25.0_f64,
        iv_percentile in 21.0..100.0_f64,
        capital in 5_000.0..100_000.0_f64,
        seed in any::<u64>(),
    ) {
        let snap = synthetic(spot, vix, iv_percentile, seed);
        let config = EngineConfig { capital, ..EngineConfig::default() };

        let decision = evaluate(&snap, &config);
        prop_assert!(decision.is_ok(), "{:?}", decision);

        if let Ok(Decision::Signal(signal)) = decision {
            prop_assert!(signal.strikes_ordered());
            prop_assert!(signal.contracts >= 1);
            prop_assert!(signal.total_max_risk <= signal.max_risk_budget + 1e-6);
            prop_assert!(signal.net_credit > 0.0);
            prop_assert!(signal.max_risk_per_contract > 0.0);
            prop_assert!(signal.trace.all_passed());

            for strike in [
                signal.long_put_strike,
                signal.short_put_strike,
                signal.short_call_strike,
                signal.long_call_strike,
            ] {
                prop_assert!(snap.chain.iter().any(|c| c.strike == strike && c.bid > 0.0));
            }
        }
    }
}

// ── 4. Idempotence ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn evaluation_is_idempotent(
        spot in arb_spot(),
        vix in 5.0..40.0_f64,
        iv_percentile in 0.0..100.0_f64,
        seed in any::<u64>(),
    ) {
        let snap = synthetic(spot, vix, iv_percentile, seed);
        let config = EngineConfig::default();
        prop_assert_eq!(evaluate(&snap, &config), evaluate(&snap, &config));
    }
}
