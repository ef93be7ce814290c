//! NekoTrack: Claw-Machine Vending Operations Analytics
//!
//! Converts raw cumulative machine counters into payout-rate intelligence
//! for a fleet of claw machines.
//!
//! ## Architecture
//!
//! - **Analytics**: counter normalization, per-machine rate series, fleet
//!   aggregation, leaderboard, profit estimation
//! - **Store**: sled-backed record store and machine registry (plus an
//!   in-memory fake for tests)
//! - **API**: JSON dashboard endpoints over Axum

pub mod analytics;
pub mod api;
pub mod config;
pub mod store;
pub mod types;

// Re-export configuration
pub use config::{AnalyticsConfig, AppConfig};

// Re-export commonly used types
pub use types::{
    ClawParams, DailyDelta, FleetDailyPoint, FleetOverview, Machine, MachineRateSummary,
    MachineStatus, Reading,
};

// Re-export the engine and analytics surface
pub use analytics::{
    AnalyticsEngine, AnalyticsError, Leaderboard, LeaderboardRow, ProfitAssumptions,
    ProfitEstimate,
};

// Re-export storage
pub use store::{MachineRegistry, MemoryStore, RecordStore, SledStore, StoreError};
