//! Plain-text rendering of decisions, history, and system errors.
//!
//! Output goes to stdout or is handed to an external notifier unchanged.

use std::fmt::Display;

use chrono::NaiveDate;

use condor_core::domain::{Decision, IronCondorSignal, ReasoningTrace};

use crate::history::HistoryEntry;

pub fn render_decision(symbol: &str, trade_date: NaiveDate, decision: &Decision) -> String {
    match decision {
        Decision::Signal(signal) => render_signal(signal),
        Decision::NoSignal(trace) => {
            let mut out = format!("NO SIGNAL: {symbol} {trade_date}\n");
            let failed: Vec<&str> = trace.failures().map(|r| r.rule.name()).collect();
            out.push_str(&format!("  Failed: {}\n", failed.join(", ")));
            render_trace(&mut out, trace);
            out
        }
    }
}

fn render_signal(s: &IronCondorSignal) -> String {
    let mut out = format!(
        "SIGNAL: {} iron condor {} (exp {})\n",
        s.symbol, s.trade_date, s.expiration
    );
    out.push_str(&format!(
        "  Spot {:.2} | VIX {:.2} | IV pct {:.1} | Expected move {:.2} ({:.2}%)\n",
        s.spot, s.vix, s.iv_percentile, s.expected_move, s.expected_move_pct
    ));

    out.push_str("\n  Legs\n");
    out.push_str(&format!(
        "    Buy  put  {:>8.2} @ {:.2}\n",
        s.long_put_strike, s.long_put_premium
    ));
    out.push_str(&format!(
        "    Sell put  {:>8.2} @ {:.2}\n",
        s.short_put_strike, s.short_put_premium
    ));
    out.push_str(&format!(
        "    Sell call {:>8.2} @ {:.2}\n",
        s.short_call_strike, s.short_call_premium
    ));
    out.push_str(&format!(
        "    Buy  call {:>8.2} @ {:.2}\n",
        s.long_call_strike, s.long_call_premium
    ));

    out.push_str(&format!(
        "\n  Net credit   {:.2} (${:.2} per contract)\n",
        s.net_credit, s.net_credit_per_contract
    ));
    out.push_str(&format!("  Wing width   {:.2}\n", s.wing_width));
    out.push_str(&format!(
        "  Max risk     ${:.2} per contract\n",
        s.max_risk_per_contract
    ));
    out.push_str(&format!(
        "  Breakevens   {:.2} / {:.2}\n",
        s.breakeven_lower, s.breakeven_upper
    ));
    out.push_str(&format!(
        "  Contracts    {} (total risk ${:.2} of ${:.2} budget, {:.2}% of capital)\n",
        s.contracts, s.total_max_risk, s.max_risk_budget, s.risk_percent
    ));
    out.push_str(&format!("  Risk level   {}\n", s.risk_level));
    out.push_str(&format!("  Confidence   {}\n", s.confidence));
    for warning in &s.warnings {
        out.push_str(&format!("  Warning: {warning}\n"));
    }

    render_trace(&mut out, &s.trace);
    out
}

fn render_trace(out: &mut String, trace: &ReasoningTrace) {
    out.push_str("\n  Reasoning\n");
    for entry in trace.entries() {
        out.push_str(&format!("    {entry}\n"));
    }
}

/// Operator-facing alert for a run that produced no decision at all.
pub fn render_system_error(trade_date: Option<NaiveDate>, err: &dyn Display) -> String {
    let mut out = match trade_date {
        Some(date) => format!("SYSTEM ERROR ({date}): {err}\n"),
        None => format!("SYSTEM ERROR: {err}\n"),
    };
    out.push_str("  No decision was produced. Do not trade on stale output.\n");
    out
}

/// One line per entry, in the order given.
pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "no recorded decisions\n".to_string();
    }
    let mut out = String::new();
    for e in entries {
        let summary = match &e.decision {
            Decision::Signal(s) => format!(
                "SIGNAL     {}/{}/{}/{} x{}  credit {:.2}  risk ${:.2}",
                s.long_put_strike,
                s.short_put_strike,
                s.short_call_strike,
                s.long_call_strike,
                s.contracts,
                s.net_credit,
                s.total_max_risk
            ),
            Decision::NoSignal(trace) => {
                let failed: Vec<&str> = trace.failures().map(|r| r.rule.name()).collect();
                format!("NO SIGNAL  {}", failed.join(", "))
            }
        };
        out.push_str(&format!(
            "{}  {:<5} {}  [{}]\n",
            e.trade_date,
            e.symbol,
            summary,
            e.fingerprint.short()
        ));
    }
    out
}
