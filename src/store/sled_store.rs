//! Sled-backed record store and machine registry
//!
//! Layout:
//! - `machines` tree: key = machine id, value = JSON [`Machine`]
//! - `readings` tree: key = `machine_id/YYYY-MM-DD`, value = JSON [`Reading`]
//!
//! The composite reading key makes the one-reading-per-machine-per-day
//! invariant a property of the keyspace (a second write for the same day is
//! an upsert) and gives chronological order for free on a prefix scan.

use super::{MachineRegistry, RecordStore, StoreError};
use crate::types::{Machine, Reading};
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const MACHINES_TREE: &str = "machines";
const READINGS_TREE: &str = "readings";

/// Persistent operations store.
///
/// Note: writes are not flushed individually. Sled provides durability via
/// background flushing; on crash at most the last few writes may be lost,
/// which is acceptable for daily hand-entered counters.
#[derive(Clone)]
pub struct SledStore {
    db: Arc<sled::Db>,
    machines: sled::Tree,
    readings: sled::Tree,
}

impl SledStore {
    /// Open or create the store at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let machines = db.open_tree(MACHINES_TREE)?;
        let readings = db.open_tree(READINGS_TREE)?;
        info!(machines = machines.len(), readings = readings.len(), "opened record store");
        Ok(Self {
            db: Arc::new(db),
            machines,
            readings,
        })
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    fn reading_key(machine_id: &str, date: NaiveDate) -> Vec<u8> {
        // NaiveDate displays as YYYY-MM-DD, which sorts chronologically
        format!("{machine_id}/{date}").into_bytes()
    }

    fn reading_prefix(machine_id: &str) -> Vec<u8> {
        format!("{machine_id}/").into_bytes()
    }
}

impl RecordStore for SledStore {
    fn readings_for(&self, machine_id: &str) -> Result<Vec<Reading>, StoreError> {
        let mut readings = Vec::new();
        for item in self.readings.scan_prefix(Self::reading_prefix(machine_id)) {
            let (_key, value) = item?;
            readings.push(serde_json::from_slice::<Reading>(&value)?);
        }
        debug!(machine_id, count = readings.len(), "fetched readings");
        Ok(readings)
    }

    fn upsert_reading(&self, reading: &Reading) -> Result<(), StoreError> {
        let Some(mut machine) = self.machine(&reading.machine_id)? else {
            return Err(StoreError::UnknownMachine(reading.machine_id.clone()));
        };

        let key = Self::reading_key(&reading.machine_id, reading.date);
        let value = serde_json::to_vec(reading)?;
        self.readings.insert(key, value)?;

        // The reading carries the parameters in force that day; mirror them
        // onto the machine record so the registry shows current config.
        machine.params = reading.params.clone();
        self.upsert_machine(&machine)?;

        debug!(machine_id = %reading.machine_id, date = %reading.date, "stored reading");
        Ok(())
    }
}

impl MachineRegistry for SledStore {
    fn machine_ids(&self) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::new();
        for item in self.machines.iter() {
            let (key, _value) = item?;
            ids.push(String::from_utf8_lossy(&key).into_owned());
        }
        Ok(ids)
    }

    fn machines(&self) -> Result<Vec<Machine>, StoreError> {
        let mut machines = Vec::new();
        for item in self.machines.iter() {
            let (_key, value) = item?;
            machines.push(serde_json::from_slice::<Machine>(&value)?);
        }
        Ok(machines)
    }

    fn machine(&self, machine_id: &str) -> Result<Option<Machine>, StoreError> {
        match self.machines.get(machine_id.as_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice::<Machine>(&value)?)),
            None => Ok(None),
        }
    }

    fn upsert_machine(&self, machine: &Machine) -> Result<(), StoreError> {
        let value = serde_json::to_vec(machine)?;
        self.machines.insert(machine.id.as_bytes(), value)?;
        Ok(())
    }
}
