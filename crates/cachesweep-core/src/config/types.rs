//! Configuration type definitions.
//!
//! # Example Configuration
//!
//! ```toml
//! [run]
//! progress_interval = 25
//! subdir_accounting = "per-entry"
//!
//! [log]
//! dir = "/var/log/cachesweep"
//! app_name = "Workstation Cleaner"
//!
//! [roots]
//! local_app_data = "D:/Users/me/AppData/Local"
//!
//! [catalog]
//! path = "/etc/cachesweep/catalog.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Runtime configuration derived from the environment rather than config
/// files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for cachesweep data (default: `~/.cachesweep`,
    /// overridable with `CACHESWEEP_HOME`).
    pub base_dir: PathBuf,
}

/// Configuration loaded from TOML files.
///
/// Loaded from `~/.cachesweep/config.toml`, then `./.cachesweep/config.toml`;
/// project values override user values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub log: LogConfig,

    /// Root overrides, merged over the platform roots.
    #[serde(default)]
    pub roots: BTreeMap<String, PathBuf>,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Successful removals between progress messages. Default: 10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_interval: Option<u64>,

    /// `collapsed` (default) or `per-entry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdir_accounting: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Directory for cleanup logs. Default: `<base_dir>/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Name written in the log header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog file to use instead of the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
