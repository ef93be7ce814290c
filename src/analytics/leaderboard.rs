//! Machine leaderboard
//!
//! Ranks the fleet by each of the three summary rates. A lower payout rate
//! means the machine hands out more toys per coin, so operators read the
//! top of the list as "most profitable".

use crate::types::{Machine, MachineRateSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ranked machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub machine_id: String,
    pub name: String,
    pub rate: f64,
    /// Operator notes carried through for display (e.g. "sticky claw")
    pub notes: Option<String>,
}

/// Fleet rankings, one list per summary rate, each descending by rate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    pub last_day: Vec<LeaderboardRow>,
    pub last_3_day: Vec<LeaderboardRow>,
    pub all_time: Vec<LeaderboardRow>,
}

/// Build rankings from registry machines and their rate summaries.
///
/// Machines without a matching summary are skipped; summaries for
/// unregistered machines are ignored.
pub fn build(machines: &[Machine], summaries: &[MachineRateSummary]) -> Leaderboard {
    let by_id: HashMap<&str, &MachineRateSummary> = summaries
        .iter()
        .map(|s| (s.machine_id.as_str(), s))
        .collect();

    let rank = |rate_of: fn(&MachineRateSummary) -> f64| -> Vec<LeaderboardRow> {
        let mut rows: Vec<LeaderboardRow> = machines
            .iter()
            .filter_map(|machine| {
                by_id.get(machine.id.as_str()).map(|summary| LeaderboardRow {
                    machine_id: machine.id.clone(),
                    name: if machine.name.is_empty() {
                        machine.id.clone()
                    } else {
                        machine.name.clone()
                    },
                    rate: rate_of(summary),
                    notes: machine.notes.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.rate.total_cmp(&a.rate));
        rows
    };

    Leaderboard {
        last_day: rank(|s| s.last_day_rate),
        last_3_day: rank(|s| s.last_3_day_rate),
        all_time: rank(|s| s.all_time_rate),
    }
}
