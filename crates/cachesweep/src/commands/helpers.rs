use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use cachesweep_core::catalog::{load_catalog_file, parse_catalog};
use cachesweep_core::events;
use cachesweep_core::{
    Catalog, CatalogError, Config, ConfigError, DeletionEngine, OperationSpec, SweepConfig,
};

#[cfg(windows)]
const BUILTIN_CATALOG: &str = include_str!("../../catalogs/windows.toml");
#[cfg(not(windows))]
const BUILTIN_CATALOG: &str = include_str!("../../catalogs/unix.toml");

/// Load the config hierarchy. A malformed file fails the command instead of
/// falling back to defaults.
pub fn load_config() -> Result<SweepConfig, ConfigError> {
    SweepConfig::load_hierarchy().map_err(|e| {
        eprintln!(
            "Could not load config: {}\n\
             Tip: Check ~/.cachesweep/config.toml and ./.cachesweep/config.toml for syntax errors.",
            e
        );
        error!(event = "cli.config.load_failed", error = %e);
        events::log_app_error(&e);
        e
    })
}

/// `--catalog` wins over `[catalog] path`, which wins over the built-in catalog.
pub fn load_catalog(matches: &ArgMatches, config: &SweepConfig) -> Result<Catalog, CatalogError> {
    let path = matches
        .get_one::<String>("catalog")
        .map(PathBuf::from)
        .or_else(|| config.catalog.path.clone());

    let catalog = match &path {
        Some(path) => load_catalog_file(path),
        None => builtin_catalog(),
    };

    match catalog {
        Ok(catalog) => {
            let source = path
                .as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());
            info!(
                event = "cli.catalog.load_completed",
                source = %source,
                count = catalog.len()
            );
            Ok(catalog)
        }
        Err(e) => {
            eprintln!("Failed to load catalog: {}", e);
            error!(event = "cli.catalog.load_failed", error = %e);
            events::log_app_error(&e);
            Err(e)
        }
    }
}

pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(BUILTIN_CATALOG)
}

pub fn resolve_log_dir(matches: &ArgMatches, config: &SweepConfig) -> PathBuf {
    matches
        .get_one::<String>("log-dir")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.log_dir(&Config::new()))
}

/// Operations named on the command line, or the whole catalog for `--all`.
pub fn select_operations(
    matches: &ArgMatches,
    catalog: &Catalog,
) -> Result<Vec<OperationSpec>, CatalogError> {
    if matches.get_flag("all") {
        return Ok(catalog.operations().to_vec());
    }

    let names: Vec<&String> = matches
        .get_many::<String>("operations")
        .map(|names| names.collect())
        .unwrap_or_default();

    catalog.select(&names).inspect_err(|e| {
        eprintln!("{}", e);
        eprintln!("Tip: Run 'cachesweep list' to see available operations.");
        error!(event = "cli.selection_failed", error = %e);
    })
}

pub fn build_engine(config: &SweepConfig) -> Result<DeletionEngine, ConfigError> {
    Ok(DeletionEngine::new(
        config.subdir_accounting()?,
        config.progress_interval(),
    ))
}
