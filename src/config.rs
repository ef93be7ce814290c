//! Application configuration
//!
//! TOML-backed, every section defaulted so an absent file or a partial one
//! behaves identically to the built-in values.
//!
//! ## Loading Order
//!
//! 1. `NEKOTRACK_CONFIG` environment variable (path to TOML file)
//! 2. `nekotrack.toml` in the current working directory
//! 3. Built-in defaults

use crate::analytics::ProfitAssumptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors loading configuration from disk
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub analytics: AnalyticsConfig,
    pub profit: ProfitAssumptions,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the sled database
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Analytics tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Most recent dates kept on the fleet plotting axis
    pub fleet_window_days: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            fleet_window_days: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration using the standard search order.
    ///
    /// A broken file logs a warning and falls through to the next source
    /// rather than aborting startup.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("NEKOTRACK_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "loaded config from NEKOTRACK_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "failed to load config from NEKOTRACK_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "NEKOTRACK_CONFIG points to non-existent file, falling back");
            }
        }

        let local = Path::new("nekotrack.toml");
        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!("loaded config from ./nekotrack.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "failed to load ./nekotrack.toml, using defaults");
                }
            }
        }

        info!("using built-in default config");
        Self::default()
    }

    /// Load and parse a specific TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}
