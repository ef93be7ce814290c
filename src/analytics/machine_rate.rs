//! Per-machine payout-rate calculator
//!
//! Turns a machine's reading history into a daily delta series plus
//! all-time, trailing-3-day and last-day summary rates. "3 days" means the
//! three most recent observed entries, not three calendar days; gaps are
//! never backfilled.

use super::normalizer;
use crate::types::{DailyDelta, MachineRateSummary, Reading};

/// Entries in the trailing summary window.
const TRAILING_ENTRIES: usize = 3;

/// Compute the rate summary for one machine.
///
/// Readings may arrive in any order; they are sorted ascending by date
/// before differencing. Fewer than two readings is not an error: the
/// series is empty and every summary rate is 0.0.
pub fn calculate(machine_id: &str, mut readings: Vec<Reading>) -> MachineRateSummary {
    readings.sort_by_key(|r| r.date);

    let mut daily_series = Vec::with_capacity(readings.len().saturating_sub(1));
    for pair in readings.windows(2) {
        let (coins_in_delta, toys_payout_delta) = normalizer::normalize(&pair[0], &pair[1]);
        daily_series.push(DailyDelta {
            date: pair[1].date,
            coins_in_delta,
            toys_payout_delta,
            payout_rate: daily_rate(coins_in_delta, toys_payout_delta),
        });
    }

    let all_time_rate = ratio_of_sums(&daily_series);
    let trailing_start = daily_series.len().saturating_sub(TRAILING_ENTRIES);
    let last_3_day_rate = ratio_of_sums(&daily_series[trailing_start..]);
    let last_day_rate = daily_series.last().map_or(0.0, |d| d.payout_rate);

    MachineRateSummary {
        machine_id: machine_id.to_string(),
        daily_series,
        all_time_rate,
        last_3_day_rate,
        last_day_rate,
    }
}

/// Daily rate convention: exactly 0.0 when either delta is zero.
///
/// This is not the mathematically "correct" rate for a zero-payout day,
/// but downstream dashboards rely on it. Do not change it.
fn daily_rate(coins_in_delta: u64, toys_payout_delta: u64) -> f64 {
    if coins_in_delta == 0 || toys_payout_delta == 0 {
        0.0
    } else {
        coins_in_delta as f64 / toys_payout_delta as f64
    }
}

/// Ratio of delta sums over a series slice, 0.0 when either sum is zero.
fn ratio_of_sums(series: &[DailyDelta]) -> f64 {
    let coins: u64 = series.iter().map(|d| d.coins_in_delta).sum();
    let toys: u64 = series.iter().map(|d| d.toys_payout_delta).sum();
    if coins == 0 || toys == 0 {
        0.0
    } else {
        coins as f64 / toys as f64
    }
}
