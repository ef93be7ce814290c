//! Payout-rate analytics engine
//!
//! Converts raw cumulative machine counters into daily deltas, per-machine
//! payout-rate series with trailing summaries, and a date-aligned fleet
//! series. Everything here is a pure transformation over already-fetched
//! readings; the only I/O lives behind the store traits in [`engine`].
//!
//! Two deliberately asymmetric conventions are preserved for compatibility
//! with existing dashboards:
//! - a per-machine daily or summary rate with a zero numerator or
//!   denominator is exactly `0.0`, never an error;
//! - a fleet date whose payout total is zero is an error
//!   ([`AnalyticsError::ZeroFleetPayout`]) surfaced to the caller.

pub mod engine;
pub mod fleet;
pub mod leaderboard;
pub mod machine_rate;
pub mod normalizer;
pub mod profit;

pub use engine::AnalyticsEngine;
pub use leaderboard::{Leaderboard, LeaderboardRow};
pub use profit::{ProfitAssumptions, ProfitEstimate};

use chrono::NaiveDate;
use thiserror::Error;

/// Errors in analytics computation
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The fleet payout total for a date is zero, so the fleet rate is
    /// undefined. Unlike the per-machine convention this is not defaulted
    /// to 0.0; callers must skip the date or report it.
    #[error("fleet payout total is zero on {date}; fleet rate undefined")]
    ZeroFleetPayout { date: NaiveDate },

    #[error("store error: {0}")]
    Store(#[from] crate::store::StoreError),
}
