//! # Configuration System
//!
//! Hierarchical TOML configuration.
//!
//! ## Configuration Hierarchy
//!
//! Later sources override earlier ones:
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.cachesweep/config.toml`
//! 3. **Project config** - `./.cachesweep/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use cachesweep_core::config::SweepConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SweepConfig::load_hierarchy()?;
//!     let accounting = config.subdir_accounting()?;
//!     let roots = config.root_map();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

// Public API exports
pub use defaults::HOME_ENV;
pub use types::{CatalogConfig, Config, LogConfig, RunConfig, SweepConfig};
pub use validation::validate_config;

impl SweepConfig {
    /// See [`loading::load_hierarchy`].
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// See [`validation::validate_config`].
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
