use crate::config::types::SweepConfig;
use crate::errors::ConfigError;

/// Reject configurations that would fail later at run time.
pub fn validate_config(config: &SweepConfig) -> Result<(), ConfigError> {
    if config.run.progress_interval == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "run.progress_interval must be at least 1".to_string(),
        });
    }

    config.subdir_accounting()?;

    if let Some(name) = &config.log.app_name
        && name.trim().is_empty()
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "log.app_name must not be empty".to_string(),
        });
    }

    for (root, path) in &config.roots {
        if root.trim().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: "roots entries need a name".to_string(),
            });
        }
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfiguration {
                message: format!("root '{root}' has an empty path"),
            });
        }
    }

    Ok(())
}
