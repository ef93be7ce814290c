//! Record store and machine registry
//!
//! The analytics engine consumes these through two read-oriented traits so
//! tests can swap in [`MemoryStore`] without touching sled. [`SledStore`]
//! is the production implementation backing the HTTP API.

mod memory;
mod sled_store;

pub use memory::MemoryStore;
pub use sled_store::SledStore;

use crate::types::{Machine, Reading};
use thiserror::Error;

/// Errors from store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sled::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown machine: {0}")]
    UnknownMachine(String),

    #[error("store lock poisoned")]
    LockPoisoned,
}

/// Access to per-machine daily counter readings.
///
/// `readings_for` must return every historical reading for the machine;
/// order is not guaranteed and callers sort by date themselves.
pub trait RecordStore: Send + Sync {
    fn readings_for(&self, machine_id: &str) -> Result<Vec<Reading>, StoreError>;

    /// Insert or replace the reading for `(machine_id, date)`.
    ///
    /// Also mirrors the reading's claw parameters onto the machine record.
    /// Fails with [`StoreError::UnknownMachine`] when the machine is not
    /// registered.
    fn upsert_reading(&self, reading: &Reading) -> Result<(), StoreError>;
}

/// Enumeration of machines to analyze, in stable registry order.
pub trait MachineRegistry: Send + Sync {
    fn machine_ids(&self) -> Result<Vec<String>, StoreError>;

    fn machines(&self) -> Result<Vec<Machine>, StoreError>;

    fn machine(&self, machine_id: &str) -> Result<Option<Machine>, StoreError>;

    /// Insert or replace a machine record.
    fn upsert_machine(&self, machine: &Machine) -> Result<(), StoreError>;
}
