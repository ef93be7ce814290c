//! In-memory store for tests and one-shot tooling
//!
//! Implements the same traits as the sled store so the engine and API can be
//! exercised without touching disk.

use super::{MachineRegistry, RecordStore, StoreError};
use crate::types::{Machine, Reading};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::RwLock;

#[derive(Default)]
struct Inner {
    machines: BTreeMap<String, Machine>,
    readings: BTreeMap<(String, NaiveDate), Reading>,
}

/// Fake store backed by in-memory maps. Registry order is id order, matching
/// the sled keyspace order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a machine and bulk-load `(date, coins_in, toys_payout)`
    /// readings for it. Test convenience.
    pub fn with_readings(
        &self,
        machine: Machine,
        rows: &[(NaiveDate, u64, u64)],
    ) -> Result<(), StoreError> {
        let params = machine.params.clone();
        let machine_id = machine.id.clone();
        self.upsert_machine(&machine)?;
        for &(date, coins_in, toys_payout) in rows {
            let reading = Reading::new(machine_id.clone(), date, coins_in, toys_payout, params.clone());
            self.upsert_reading(&reading)?;
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn readings_for(&self, machine_id: &str) -> Result<Vec<Reading>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner
            .readings
            .iter()
            .filter(|((id, _), _)| id == machine_id)
            .map(|(_, reading)| reading.clone())
            .collect())
    }

    fn upsert_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        let Some(machine) = inner.machines.get_mut(&reading.machine_id) else {
            return Err(StoreError::UnknownMachine(reading.machine_id.clone()));
        };
        machine.params = reading.params.clone();
        inner
            .readings
            .insert((reading.machine_id.clone(), reading.date), reading.clone());
        Ok(())
    }
}

impl MachineRegistry for MemoryStore {
    fn machine_ids(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.machines.keys().cloned().collect())
    }

    fn machines(&self) -> Result<Vec<Machine>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.machines.values().cloned().collect())
    }

    fn machine(&self, machine_id: &str) -> Result<Option<Machine>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(inner.machines.get(machine_id).cloned())
    }

    fn upsert_machine(&self, machine: &Machine) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        inner.machines.insert(machine.id.clone(), machine.clone());
        Ok(())
    }
}
