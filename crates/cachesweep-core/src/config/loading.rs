//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.cachesweep/config.toml` (or `$CACHESWEEP_HOME/config.toml`)
//! 3. **Project config** - `./.cachesweep/config.toml`
//! 4. **CLI arguments** - applied by the caller

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::config::types::{CatalogConfig, Config, LogConfig, RunConfig, SweepConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const PROJECT_DIR_NAME: &str = ".cachesweep";

/// Load and merge the user and project config files.
///
/// Missing files are not errors; unreadable or malformed ones are.
pub fn load_hierarchy() -> Result<SweepConfig, ConfigError> {
    let runtime = Config::new();
    let project = std::env::current_dir()?
        .join(PROJECT_DIR_NAME)
        .join("config.toml");
    load_hierarchy_from(&runtime.user_config_path(), &project)
}

/// Same as [`load_hierarchy`] with explicit file locations.
pub fn load_hierarchy_from(user: &Path, project: &Path) -> Result<SweepConfig, ConfigError> {
    let mut config = SweepConfig::default();

    for path in [user, project] {
        if let Some(file_config) = load_config_file(path)? {
            config = merge_configs(config, file_config);
        }
    }

    validate_config(&config)?;
    info!(
        event = "core.config.load_completed",
        progress_interval = config.progress_interval(),
        roots = config.roots.len()
    );
    Ok(config)
}

/// Load one config file. `Ok(None)` when it does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<SweepConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(event = "core.config.file_missing", path = %path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfigError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let config = toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    debug!(event = "core.config.file_loaded", path = %path.display());
    Ok(Some(config))
}

/// Merge two configurations, `override_config` taking precedence.
///
/// Optional values are replaced only when the override sets them; root
/// maps are merged entry by entry.
pub fn merge_configs(base: SweepConfig, override_config: SweepConfig) -> SweepConfig {
    SweepConfig {
        run: RunConfig {
            progress_interval: override_config
                .run
                .progress_interval
                .or(base.run.progress_interval),
            subdir_accounting: override_config
                .run
                .subdir_accounting
                .or(base.run.subdir_accounting),
        },
        log: LogConfig {
            dir: override_config.log.dir.or(base.log.dir),
            app_name: override_config.log.app_name.or(base.log.app_name),
        },
        roots: {
            let mut merged = base.roots;
            merged.extend(override_config.roots);
            merged
        },
        catalog: CatalogConfig {
            path: override_config.catalog.path.or(base.catalog.path),
        },
    }
}
