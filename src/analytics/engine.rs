//! Analytics engine
//!
//! Explicit context object wiring the store traits to the pure rate math.
//! Constructed once per process (or per test) and passed around; there is
//! no global store handle anywhere in the crate.

use super::{fleet, leaderboard, machine_rate, AnalyticsError, Leaderboard};
use crate::config::AnalyticsConfig;
use crate::store::{MachineRegistry, RecordStore};
use crate::types::{FleetOverview, MachineRateSummary};
use std::sync::Arc;
use tracing::debug;

/// Computes per-machine and fleet analytics on demand.
///
/// All computation is synchronous and recomputed per call; derived series
/// are never cached or persisted. Machines are processed sequentially in
/// registry order.
pub struct AnalyticsEngine {
    store: Arc<dyn RecordStore>,
    registry: Arc<dyn MachineRegistry>,
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(
        store: Arc<dyn RecordStore>,
        registry: Arc<dyn MachineRegistry>,
        config: AnalyticsConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn registry(&self) -> &Arc<dyn MachineRegistry> {
        &self.registry
    }

    /// Rate summary for one machine.
    pub fn machine_summary(
        &self,
        machine_id: &str,
    ) -> Result<MachineRateSummary, AnalyticsError> {
        let readings = self.store.readings_for(machine_id)?;
        debug!(machine_id, readings = readings.len(), "calculating machine summary");
        Ok(machine_rate::calculate(machine_id, readings))
    }

    /// Summaries for the whole fleet, in registry order.
    pub fn all_machine_summaries(&self) -> Result<Vec<MachineRateSummary>, AnalyticsError> {
        let ids = self.registry.machine_ids()?;
        let mut summaries = Vec::with_capacity(ids.len());
        for id in &ids {
            summaries.push(self.machine_summary(id)?);
        }
        Ok(summaries)
    }

    /// Date-aligned fleet series plus trailing rates.
    ///
    /// Propagates [`AnalyticsError::ZeroFleetPayout`] when any window date
    /// has a zero fleet payout total.
    pub fn fleet_overview(&self) -> Result<FleetOverview, AnalyticsError> {
        let summaries = self.all_machine_summaries()?;
        fleet::aggregate(&summaries, self.config.fleet_window_days)
    }

    /// Fleet rankings by each summary rate.
    pub fn leaderboard(&self) -> Result<Leaderboard, AnalyticsError> {
        let machines = self.registry.machines()?;
        let summaries = self.all_machine_summaries()?;
        Ok(leaderboard::build(&machines, &summaries))
    }
}
