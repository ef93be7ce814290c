//! Derived analytics types
//!
//! All of these are pure functions of a reading sequence at computation
//! time. Nothing here is persisted; the engine recomputes on every request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily movement of one machine's counters, derived from two adjacent
/// readings (reset-adjusted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDelta {
    /// Day the delta lands on (the later reading's date)
    pub date: NaiveDate,
    /// Coins accepted since the previous reading
    pub coins_in_delta: u64,
    /// Toys dispensed since the previous reading
    pub toys_payout_delta: u64,
    /// `coins_in_delta / toys_payout_delta`, or exactly 0.0 when either
    /// delta is zero. The zero convention is load-bearing for dashboards.
    pub payout_rate: f64,
}

/// Per-machine payout-rate series with trailing summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineRateSummary {
    pub machine_id: String,
    /// Ascending by date; one entry per adjacent reading pair
    pub daily_series: Vec<DailyDelta>,
    /// Ratio of whole-series delta sums; 0.0 when either sum is zero
    pub all_time_rate: f64,
    /// Ratio of delta sums over the last three series entries
    pub last_3_day_rate: f64,
    /// Payout rate of the final series entry; 0.0 for an empty series
    pub last_day_rate: f64,
}

/// Date-aligned fleet totals for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetDailyPoint {
    pub date: NaiveDate,
    /// Sum of `coins_in_delta` over machines with an entry on this date
    pub total_coins_in_delta: u64,
    /// Sum of `toys_payout_delta` over machines with an entry on this date
    pub total_toys_payout_delta: u64,
    /// `total_coins_in_delta / total_toys_payout_delta` (unguarded; a
    /// zero payout total is rejected during aggregation)
    pub fleet_payout_rate: f64,
}

/// Fleet-wide series plus trailing summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetOverview {
    /// Ascending by date, at most the configured plotting window
    pub daily_series: Vec<FleetDailyPoint>,
    /// Fleet rate of the most recent date in the window
    pub last_day_rate: f64,
    /// Arithmetic mean of the per-date fleet rates over the last three
    /// dates (mean of ratios, unlike the per-machine trailing rate)
    pub last_3_day_rate: f64,
}
