//! Engine integration tests
//!
//! Drives the analytics engine end-to-end over the in-memory store:
//! readings in, per-machine summaries and fleet overview out. Uses the
//! same store traits as production, so these also pin the registry-order
//! and missing-date semantics the dashboards depend on.

use chrono::NaiveDate;
use nekotrack::analytics::{AnalyticsEngine, AnalyticsError};
use nekotrack::config::AnalyticsConfig;
use nekotrack::store::MemoryStore;
use nekotrack::types::{ClawParams, Machine};
use std::sync::Arc;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn machine(id: &str, name: &str) -> Machine {
    Machine {
        id: id.to_string(),
        name: name.to_string(),
        location: "Test Arcade".to_string(),
        status: Default::default(),
        params: ClawParams::default(),
        notes: None,
    }
}

fn engine_with(
    fleet_window_days: usize,
    seed: impl FnOnce(&MemoryStore),
) -> AnalyticsEngine {
    let store = Arc::new(MemoryStore::new());
    seed(&store);
    AnalyticsEngine::new(
        store.clone(),
        store,
        AnalyticsConfig { fleet_window_days },
    )
}

#[test]
fn machine_summary_end_to_end() {
    let engine = engine_with(30, |store| {
        store
            .with_readings(
                machine("m-01", "Neko"),
                &[(date("2024-01-01"), 100, 20), (date("2024-01-02"), 150, 30)],
            )
            .unwrap();
    });

    let summary = engine.machine_summary("m-01").unwrap();
    assert_eq!(summary.daily_series.len(), 1);
    assert_eq!(summary.daily_series[0].date, date("2024-01-02"));
    assert_eq!(summary.daily_series[0].coins_in_delta, 50);
    assert_eq!(summary.daily_series[0].toys_payout_delta, 10);
    assert_eq!(summary.daily_series[0].payout_rate, 5.0);
    assert_eq!(summary.all_time_rate, 5.0);
    assert_eq!(summary.last_3_day_rate, 5.0);
    assert_eq!(summary.last_day_rate, 5.0);
}

#[test]
fn machine_with_single_reading_yields_empty_summary() {
    let engine = engine_with(30, |store| {
        store
            .with_readings(machine("m-01", "Neko"), &[(date("2024-01-01"), 100, 20)])
            .unwrap();
    });

    let summary = engine.machine_summary("m-01").unwrap();
    assert!(summary.daily_series.is_empty());
    assert_eq!(summary.all_time_rate, 0.0);
    assert_eq!(summary.last_3_day_rate, 0.0);
    assert_eq!(summary.last_day_rate, 0.0);
}

#[test]
fn summaries_come_back_in_registry_order() {
    let engine = engine_with(30, |store| {
        for id in ["m-03", "m-01", "m-02"] {
            store.with_readings(machine(id, id), &[]).unwrap();
        }
    });

    let ids: Vec<String> = engine
        .all_machine_summaries()
        .unwrap()
        .into_iter()
        .map(|s| s.machine_id)
        .collect();
    assert_eq!(ids, vec!["m-01", "m-02", "m-03"]);
}

#[test]
fn fleet_over_single_machine_reduces_to_that_machine() {
    let engine = engine_with(30, |store| {
        store
            .with_readings(
                machine("m-01", "Neko"),
                &[
                    (date("2024-01-01"), 100, 20),
                    (date("2024-01-02"), 150, 30),
                    (date("2024-01-03"), 210, 50),
                ],
            )
            .unwrap();
    });

    let summary = engine.machine_summary("m-01").unwrap();
    let overview = engine.fleet_overview().unwrap();

    assert_eq!(overview.daily_series.len(), summary.daily_series.len());
    for (point, delta) in overview.daily_series.iter().zip(&summary.daily_series) {
        assert_eq!(point.date, delta.date);
        assert_eq!(point.total_coins_in_delta, delta.coins_in_delta);
        assert_eq!(point.total_toys_payout_delta, delta.toys_payout_delta);
        assert_eq!(point.fleet_payout_rate, delta.payout_rate);
    }
}

#[test]
fn fleet_sums_across_machines_by_date() {
    let engine = engine_with(30, |store| {
        store
            .with_readings(
                machine("m-01", "Neko"),
                &[(date("2024-01-01"), 100, 20), (date("2024-01-02"), 150, 30)],
            )
            .unwrap();
        store
            .with_readings(
                machine("m-02", "Tora"),
                &[(date("2024-01-01"), 40, 10), (date("2024-01-02"), 80, 20)],
            )
            .unwrap();
    });

    let overview = engine.fleet_overview().unwrap();
    assert_eq!(overview.daily_series.len(), 1);
    let point = &overview.daily_series[0];
    assert_eq!(point.date, date("2024-01-02"));
    // m-01 contributes 50/10, m-02 contributes 40/10
    assert_eq!(point.total_coins_in_delta, 90);
    assert_eq!(point.total_toys_payout_delta, 20);
    assert_eq!(point.fleet_payout_rate, 4.5);
    assert_eq!(overview.last_day_rate, 4.5);
    assert_eq!(overview.last_3_day_rate, 4.5);
}

#[test]
fn machine_missing_a_date_is_not_zero_padded() {
    let engine = engine_with(30, |store| {
        store
            .with_readings(
                machine("m-01", "Neko"),
                &[
                    (date("2024-01-01"), 100, 20),
                    (date("2024-01-02"), 150, 30),
                    (date("2024-01-03"), 210, 40),
                ],
            )
            .unwrap();
        // m-02 skipped 2024-01-03
        store
            .with_readings(
                machine("m-02", "Tora"),
                &[(date("2024-01-01"), 40, 10), (date("2024-01-02"), 80, 20)],
            )
            .unwrap();
    });

    let overview = engine.fleet_overview().unwrap();
    assert_eq!(overview.daily_series.len(), 2);
    // 2024-01-03 carries only m-01's delta (60/10)
    let last = &overview.daily_series[1];
    assert_eq!(last.date, date("2024-01-03"));
    assert_eq!(last.total_coins_in_delta, 60);
    assert_eq!(last.total_toys_payout_delta, 10);
}

#[test]
fn fleet_window_truncates_reference_series() {
    let engine = engine_with(3, |store| {
        let rows: Vec<(NaiveDate, u64, u64)> = (1..=10)
            .map(|day| {
                (
                    NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                    100 * u64::from(day),
                    10 * u64::from(day),
                )
            })
            .collect();
        store.with_readings(machine("m-01", "Neko"), &rows).unwrap();
    });

    let overview = engine.fleet_overview().unwrap();
    assert_eq!(overview.daily_series.len(), 3);
    assert_eq!(overview.daily_series[0].date, date("2024-01-08"));
    assert_eq!(overview.daily_series[2].date, date("2024-01-10"));
}

#[test]
fn zero_fleet_payout_date_surfaces_as_error() {
    let engine = engine_with(30, |store| {
        // coins moved, zero toys paid out on the only delta day
        store
            .with_readings(
                machine("m-01", "Neko"),
                &[(date("2024-01-01"), 100, 20), (date("2024-01-02"), 140, 20)],
            )
            .unwrap();
    });

    // per-machine convention: 0.0, not an error
    let summary = engine.machine_summary("m-01").unwrap();
    assert_eq!(summary.daily_series[0].payout_rate, 0.0);

    // fleet convention: hard error
    let err = engine.fleet_overview().unwrap_err();
    assert!(matches!(
        err,
        AnalyticsError::ZeroFleetPayout { date: d } if d == date("2024-01-02")
    ));
}

#[test]
fn empty_registry_gives_empty_fleet_overview() {
    let engine = engine_with(30, |_| {});
    let overview = engine.fleet_overview().unwrap();
    assert!(overview.daily_series.is_empty());
    assert_eq!(overview.last_day_rate, 0.0);
    assert_eq!(overview.last_3_day_rate, 0.0);
}

#[test]
fn leaderboard_ranks_by_each_rate() {
    let engine = engine_with(30, |store| {
        // m-01: deltas 50/10 -> every rate 5.0
        store
            .with_readings(
                machine("m-01", "Neko"),
                &[(date("2024-01-01"), 100, 20), (date("2024-01-02"), 150, 30)],
            )
            .unwrap();
        // m-02: deltas 60/10 -> every rate 6.0
        store
            .with_readings(
                machine("m-02", "Tora"),
                &[(date("2024-01-01"), 40, 10), (date("2024-01-02"), 100, 20)],
            )
            .unwrap();
    });

    let board = engine.leaderboard().unwrap();
    assert_eq!(board.last_day[0].machine_id, "m-02");
    assert_eq!(board.last_day[0].rate, 6.0);
    assert_eq!(board.last_3_day[0].machine_id, "m-02");
    assert_eq!(board.all_time[0].machine_id, "m-02");
    assert_eq!(board.all_time[1].machine_id, "m-01");
    assert_eq!(board.all_time[1].name, "Neko");
}
