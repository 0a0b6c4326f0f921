//! Configuration type definitions for CMO.
//!
//! These types are serialized/deserialized from TOML config files. All
//! fields are optional in the file; accessor methods apply the defaults
//! from [`super::defaults`].
//!
//! # Example Configuration
//!
//! ```toml
//! [refresh]
//! interval_secs = 30
//! minimum_delay_ms = 400
//! auto_enabled = true
//!
//! [storage]
//! data_dir = "/var/lib/cmo"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults;

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.cmo/config.toml`
/// 2. Project config: `./.cmo/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CmoConfig {
    /// Dashboard refresh behavior
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Local storage locations
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Dashboard refresh configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RefreshConfig {
    /// Seconds between automatic refresh cycles.
    /// Default: 60 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_secs: Option<u64>,

    /// Minimum visible duration of a refresh cycle, in milliseconds.
    /// Keeps the loading indicator from flickering when the backend
    /// answers faster than the operator can perceive.
    /// Default: 400 ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_delay_ms: Option<u64>,

    /// Whether the periodic auto-refresh task runs.
    /// Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_enabled: Option<bool>,
}

impl RefreshConfig {
    /// Interval between automatic refresh cycles.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.unwrap_or(defaults::DEFAULT_INTERVAL_SECS))
    }

    /// Minimum visible duration of one refresh cycle.
    pub fn minimum_delay(&self) -> Duration {
        Duration::from_millis(
            self.minimum_delay_ms
                .unwrap_or(defaults::DEFAULT_MINIMUM_DELAY_MS),
        )
    }

    /// Whether the periodic auto-refresh task should be spawned.
    pub fn auto_enabled(&self) -> bool {
        self.auto_enabled.unwrap_or(defaults::DEFAULT_AUTO_ENABLED)
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the data directory.
    /// Default: `~/.cmo` (or `$CMO_DIR` when set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}
