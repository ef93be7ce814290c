//! Core domain types
//!
//! - Raw machine data: [`Reading`], [`Machine`], [`ClawParams`]
//! - Derived analytics: [`DailyDelta`], [`MachineRateSummary`], [`FleetDailyPoint`]

mod analytics;
mod record;

pub use analytics::{DailyDelta, FleetDailyPoint, FleetOverview, MachineRateSummary};
pub use record::{ClawParams, Machine, MachineStatus, Reading};
