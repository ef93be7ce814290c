//! Raw machine records as stored by the record store
//!
//! A [`Reading`] is one daily snapshot of a machine's cumulative counters.
//! Counters only increase between resets; differencing them is the job of
//! the analytics layer, never of the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claw parameters in force when a reading was taken.
///
/// Informational only: the rate math never consumes these. They are carried
/// on each reading and mirrored onto the machine record so the dashboard can
/// show the current configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClawParams {
    /// Grip strength for a winning grab
    pub strong_strength: f64,
    /// Grip strength for a partial grab
    pub medium_strength: f64,
    /// Grip strength between award intervals
    pub weak_strength: f64,
    /// Plays between guaranteed-win windows
    pub award_interval: u32,
    /// Vendor-specific mode string (free-form)
    #[serde(default)]
    pub mode: String,
}

impl Default for ClawParams {
    fn default() -> Self {
        Self {
            strong_strength: 0.0,
            medium_strength: 0.0,
            weak_strength: 0.0,
            award_interval: 0,
            mode: String::new(),
        }
    }
}

impl ClawParams {
    /// One-line operator-facing summary, e.g. `"9.5, 5.0, 2.2 | 18, normal"`.
    pub fn summary(&self) -> String {
        format!(
            "{}, {}, {} | {}, {}",
            self.strong_strength,
            self.medium_strength,
            self.weak_strength,
            self.award_interval,
            self.mode
        )
    }
}

/// One daily counter snapshot for a machine.
///
/// Invariant (enforced by the store keyspace): at most one reading per
/// `(machine_id, date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    /// Unique reading id
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Machine this reading belongs to
    pub machine_id: String,
    /// Calendar day of the snapshot (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Lifetime coins accepted (cumulative, resets on counter swap)
    pub coins_in: u64,
    /// Lifetime toys dispensed (cumulative, resets on counter swap)
    pub toys_payout: u64,
    /// Claw parameters in force that day
    #[serde(default)]
    pub params: ClawParams,
    /// Free-form operator notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl Reading {
    /// Create a reading with a fresh id and no notes.
    pub fn new(
        machine_id: impl Into<String>,
        date: NaiveDate,
        coins_in: u64,
        toys_payout: u64,
        params: ClawParams,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine_id: machine_id.into(),
            date,
            coins_in,
            toys_payout,
            params,
            notes: None,
        }
    }
}

/// Operational state of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineStatus {
    #[default]
    Active,
    Maintenance,
    Retired,
}

/// A registered claw machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// Machine identifier (registry key)
    pub id: String,
    /// Display name shown on dashboards
    pub name: String,
    /// Physical location (store, floor, corner)
    #[serde(default)]
    pub location: String,
    /// Operational state
    #[serde(default)]
    pub status: MachineStatus,
    /// Current claw parameters (updated from the latest reading)
    #[serde(default)]
    pub params: ClawParams,
    /// Free-form operator notes
    #[serde(default)]
    pub notes: Option<String>,
}
