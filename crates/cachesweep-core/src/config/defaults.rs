//! Defaults and derived values for configuration types.

use std::path::PathBuf;

use tracing::warn;

use crate::config::types::{Config, SweepConfig};
use crate::deletion::{DEFAULT_PROGRESS_INTERVAL, SubdirAccounting};
use crate::errors::ConfigError;
use crate::paths::RootMap;
use crate::worker::DEFAULT_APP_NAME;

pub const HOME_ENV: &str = "CACHESWEEP_HOME";
const BASE_DIR_NAME: &str = ".cachesweep";

impl Default for Config {
    fn default() -> Self {
        let base_dir = match std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => match dirs::home_dir() {
                Some(home) => home.join(BASE_DIR_NAME),
                None => {
                    warn!(
                        event = "core.config.home_dir_missing",
                        fallback = %std::env::temp_dir().display()
                    );
                    std::env::temp_dir().join(BASE_DIR_NAME)
                }
            },
        };

        Self { base_dir }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_config_path(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    pub fn default_logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }
}

impl SweepConfig {
    pub fn progress_interval(&self) -> u64 {
        self.run.progress_interval.unwrap_or(DEFAULT_PROGRESS_INTERVAL)
    }

    pub fn subdir_accounting(&self) -> Result<SubdirAccounting, ConfigError> {
        match &self.run.subdir_accounting {
            Some(value) => value.parse(),
            None => Ok(SubdirAccounting::default()),
        }
    }

    pub fn app_name(&self) -> &str {
        self.log.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    pub fn log_dir(&self, config: &Config) -> PathBuf {
        self.log
            .dir
            .clone()
            .unwrap_or_else(|| config.default_logs_dir())
    }

    /// Platform roots with `[roots]` overrides applied.
    pub fn root_map(&self) -> RootMap {
        let mut roots = RootMap::from_platform();
        roots.extend(self.roots.clone());
        roots
    }
}
