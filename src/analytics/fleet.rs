//! Fleet aggregator
//!
//! Aligns per-machine daily series by calendar date and sums deltas across
//! the fleet.
//!
//! Known limitation, kept for compatibility: the date axis is taken from
//! the **first** summary's series only. All machines are assumed to share
//! one observation calendar; a date present in another machine's series but
//! absent from the reference series is silently dropped. Unioning the dates
//! would change fleet totals under heterogeneous calendars, so it is not
//! done here.

use super::AnalyticsError;
use crate::types::{FleetDailyPoint, FleetOverview, MachineRateSummary};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Dates in the trailing fleet summary.
const TRAILING_DATES: usize = 3;

/// Aggregate per-machine summaries into a fleet overview.
///
/// `window_days` caps the date axis to the most recent N entries of the
/// reference (first) series; 30 is the usual plotting window.
///
/// Machines without an entry for a date contribute nothing to that date's
/// totals — there is no zero-padding. A date whose fleet payout total is
/// zero makes the fleet rate undefined and fails the whole aggregation;
/// unlike the per-machine convention this is deliberately not defaulted
/// to 0.0.
pub fn aggregate(
    summaries: &[MachineRateSummary],
    window_days: usize,
) -> Result<FleetOverview, AnalyticsError> {
    let Some(reference) = summaries.first() else {
        return Ok(FleetOverview::default());
    };

    let series = &reference.daily_series;
    let window_start = series.len().saturating_sub(window_days);
    let window: Vec<NaiveDate> = series[window_start..].iter().map(|d| d.date).collect();

    // Explicit date -> (coins, toys) accumulation; the missing-date policy
    // lives here, not in any implicit join.
    let mut totals: BTreeMap<NaiveDate, (u64, u64)> =
        window.iter().map(|&date| (date, (0u64, 0u64))).collect();
    for summary in summaries {
        for delta in &summary.daily_series {
            if let Some((coins, toys)) = totals.get_mut(&delta.date) {
                *coins += delta.coins_in_delta;
                *toys += delta.toys_payout_delta;
            }
        }
    }

    let mut daily_series = Vec::with_capacity(window.len());
    for &date in &window {
        let (total_coins, total_toys) = totals[&date];
        if total_toys == 0 {
            return Err(AnalyticsError::ZeroFleetPayout { date });
        }
        daily_series.push(FleetDailyPoint {
            date,
            total_coins_in_delta: total_coins,
            total_toys_payout_delta: total_toys,
            fleet_payout_rate: total_coins as f64 / total_toys as f64,
        });
    }

    let last_day_rate = daily_series.last().map_or(0.0, |p| p.fleet_payout_rate);
    let last_3_day_rate = mean_rate(&daily_series);

    debug!(
        machines = summaries.len(),
        dates = daily_series.len(),
        last_day_rate,
        "aggregated fleet series"
    );

    Ok(FleetOverview {
        daily_series,
        last_day_rate,
        last_3_day_rate,
    })
}

/// Arithmetic mean of the per-date fleet rates over the trailing window.
///
/// Mean of ratios, not ratio of sums — this intentionally differs from the
/// per-machine trailing calculation.
fn mean_rate(series: &[FleetDailyPoint]) -> f64 {
    let start = series.len().saturating_sub(TRAILING_DATES);
    let tail = &series[start..];
    if tail.is_empty() {
        return 0.0;
    }
    tail.iter().map(|p| p.fleet_payout_rate).sum::<f64>() / tail.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DailyDelta;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn delta(day: u32, coins: u64, toys: u64) -> DailyDelta {
        DailyDelta {
            date: date(day),
            coins_in_delta: coins,
            toys_payout_delta: toys,
            payout_rate: if coins == 0 || toys == 0 {
                0.0
            } else {
                coins as f64 / toys as f64
            },
        }
    }

    fn summary(machine_id: &str, deltas: Vec<DailyDelta>) -> MachineRateSummary {
        MachineRateSummary {
            machine_id: machine_id.to_string(),
            daily_series: deltas,
            all_time_rate: 0.0,
            last_3_day_rate: 0.0,
            last_day_rate: 0.0,
        }
    }

    #[test]
    fn empty_fleet_gives_empty_overview() {
        let overview = aggregate(&[], 30).unwrap();
        assert!(overview.daily_series.is_empty());
        assert_eq!(overview.last_day_rate, 0.0);
        assert_eq!(overview.last_3_day_rate, 0.0);
    }

    #[test]
    fn single_machine_fleet_reduces_to_that_machine() {
        let m = summary("m-01", vec![delta(1, 100, 10), delta(2, 60, 20)]);
        let overview = aggregate(std::slice::from_ref(&m), 30).unwrap();

        assert_eq!(overview.daily_series.len(), 2);
        for (point, d) in overview.daily_series.iter().zip(&m.daily_series) {
            assert_eq!(point.date, d.date);
            assert_eq!(point.total_coins_in_delta, d.coins_in_delta);
            assert_eq!(point.total_toys_payout_delta, d.toys_payout_delta);
            assert_eq!(point.fleet_payout_rate, d.payout_rate);
        }
        assert_eq!(overview.last_day_rate, 3.0);
    }

    #[test]
    fn machine_missing_a_date_contributes_nothing_that_day() {
        let a = summary("m-01", vec![delta(1, 100, 10), delta(2, 60, 20)]);
        // m-02 has no entry for day 2
        let b = summary("m-02", vec![delta(1, 50, 10)]);
        let overview = aggregate(&[a, b], 30).unwrap();

        assert_eq!(overview.daily_series[0].total_coins_in_delta, 150);
        assert_eq!(overview.daily_series[0].total_toys_payout_delta, 20);
        // day 2 carries only m-01's numbers, no phantom zero row
        assert_eq!(overview.daily_series[1].total_coins_in_delta, 60);
        assert_eq!(overview.daily_series[1].total_toys_payout_delta, 20);
    }

    #[test]
    fn dates_outside_reference_series_are_dropped() {
        let a = summary("m-01", vec![delta(2, 60, 20)]);
        // day 1 exists only for m-02 and is not on the reference axis
        let b = summary("m-02", vec![delta(1, 50, 10), delta(2, 40, 20)]);
        let overview = aggregate(&[a, b], 30).unwrap();

        assert_eq!(overview.daily_series.len(), 1);
        assert_eq!(overview.daily_series[0].date, date(2));
        assert_eq!(overview.daily_series[0].total_coins_in_delta, 100);
    }

    #[test]
    fn window_truncates_to_most_recent_dates() {
        let long: Vec<DailyDelta> = (1..=10).map(|day| delta(day, 10 * day as u64, 10)).collect();
        let m = summary("m-01", long);
        let overview = aggregate(&[m], 4).unwrap();

        assert_eq!(overview.daily_series.len(), 4);
        assert_eq!(overview.daily_series[0].date, date(7));
        assert_eq!(overview.daily_series[3].date, date(10));
    }

    #[test]
    fn zero_fleet_payout_is_an_error_not_zero() {
        let a = summary("m-01", vec![delta(1, 40, 0)]);
        let b = summary("m-02", vec![delta(1, 25, 0)]);
        let err = aggregate(&[a, b], 30).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::ZeroFleetPayout { date: d } if d == date(1)
        ));
    }

    #[test]
    fn zero_coins_with_nonzero_payout_is_fine() {
        let m = summary("m-01", vec![delta(1, 0, 5)]);
        let overview = aggregate(&[m], 30).unwrap();
        assert_eq!(overview.daily_series[0].fleet_payout_rate, 0.0);
    }

    #[test]
    fn trailing_rate_is_mean_of_ratios() {
        // Per-date rates 10.0, 3.0, 2.0 -> mean 5.0. Ratio-of-sums would
        // give (100+60+40)/(10+20+20) = 4.0, which is the wrong formula
        // for the fleet trailing rate.
        let m = summary(
            "m-01",
            vec![delta(1, 100, 10), delta(2, 60, 20), delta(3, 40, 20)],
        );
        let overview = aggregate(&[m], 30).unwrap();
        assert_eq!(overview.last_3_day_rate, 5.0);
        assert_eq!(overview.last_day_rate, 2.0);
    }
}
