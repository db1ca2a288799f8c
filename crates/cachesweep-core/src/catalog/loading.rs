//! Catalog parsing and validation.
//!
//! The on-disk format is an ordered list of `[[operation]]` tables:
//!
//! ```toml
//! [[operation]]
//! name = "GPU Shader Cache"
//! kind = "composite-delete"
//! targets = [
//!     { env = "local_app_data", suffix = "NVIDIA/DXCache" },
//!     { path = "C:/Windows/Temp" },
//!     { glob = "{app_data}/Mozilla/Firefox/Profiles/*/cache2" },
//! ]
//!
//! [[operation]]
//! name = "Windows Store + UWP Cache"
//! kind = "enumerate-then-delete"
//! targets = [
//!     { enumerate = { env = "local_app_data", suffix = "Packages" }, subdirs = ["TempState", "AC", "LocalCache"] },
//! ]
//!
//! [[operation]]
//! name = "WinSxS Cleanup (DISM)"
//! kind = "external-tool"
//! program = "Dism.exe"
//! args = ["/Online", "/Cleanup-Image", "/StartComponentCleanup"]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use super::errors::CatalogError;
use super::registry::Catalog;
use super::types::{Location, OperationKind, OperationSpec, TargetSpec};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    operation: Vec<OperationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum KindTag {
    PlainDelete,
    CompositeDelete,
    EnumerateThenDelete,
    ExternalTool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OperationEntry {
    name: String,
    kind: KindTag,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    targets: Vec<TargetEntry>,
    #[serde(default)]
    program: Option<String>,
    #[serde(default)]
    args: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocationEntry {
    Literal {
        path: PathBuf,
    },
    EnvRelative {
        env: String,
        #[serde(default)]
        suffix: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TargetEntry {
    Enumerate {
        enumerate: LocationEntry,
        subdirs: Vec<PathBuf>,
        #[serde(default)]
        filter: Option<String>,
    },
    Glob {
        glob: String,
    },
    Location(LocationEntry),
}

impl From<LocationEntry> for Location {
    fn from(entry: LocationEntry) -> Self {
        match entry {
            LocationEntry::Literal { path } => Location::Literal { path },
            LocationEntry::EnvRelative { env, suffix } => Location::EnvRelative { root: env, suffix },
        }
    }
}

/// Parse a catalog from TOML text and validate it.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::ParseFailed {
        message: e.to_string(),
    })?;

    let mut seen = HashSet::new();
    let mut operations = Vec::with_capacity(file.operation.len());

    for entry in file.operation {
        let spec = convert_entry(entry)?;
        if !seen.insert(spec.name.clone()) {
            return Err(CatalogError::DuplicateName { name: spec.name });
        }
        operations.push(spec);
    }

    debug!(event = "core.catalog.parse_completed", count = operations.len());
    Ok(Catalog::new(operations))
}

/// Load and validate a catalog file.
pub fn load_catalog_file(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;

    let catalog = parse_catalog(&content)?;

    info!(
        event = "core.catalog.load_completed",
        path = %path.display(),
        count = catalog.len()
    );
    Ok(catalog)
}

fn convert_entry(entry: OperationEntry) -> Result<OperationSpec, CatalogError> {
    let name = entry.name.trim().to_string();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }

    let kind = match entry.kind {
        KindTag::ExternalTool => {
            let program = entry
                .program
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| CatalogError::MissingProgram { name: name.clone() })?;
            OperationKind::ExternalTool {
                program,
                args: entry.args,
            }
        }
        tag => {
            if entry.targets.is_empty() {
                return Err(CatalogError::MissingTargets { name });
            }
            let targets = entry
                .targets
                .into_iter()
                .map(|t| convert_target(&name, t))
                .collect::<Result<Vec<_>, _>>()?;

            match tag {
                KindTag::PlainDelete => {
                    let mut targets = targets.into_iter();
                    match (targets.next(), targets.next()) {
                        (Some(target), None) => OperationKind::PlainDelete { target },
                        _ => {
                            return Err(CatalogError::InvalidTarget {
                                name,
                                message: "plain-delete takes exactly one target, use composite-delete for several".to_string(),
                            });
                        }
                    }
                }
                KindTag::EnumerateThenDelete => {
                    if let Some(other) = targets
                        .iter()
                        .find(|t| !matches!(t, TargetSpec::Enumerate { .. }))
                    {
                        return Err(CatalogError::InvalidTarget {
                            name,
                            message: format!(
                                "enumerate-then-delete only accepts enumerate targets, got '{other}'"
                            ),
                        });
                    }
                    OperationKind::EnumerateThenDelete { targets }
                }
                _ => OperationKind::CompositeDelete { targets },
            }
        }
    };

    Ok(OperationSpec {
        name,
        description: entry.description,
        kind,
    })
}

fn convert_target(name: &str, entry: TargetEntry) -> Result<TargetSpec, CatalogError> {
    let invalid = |message: String| CatalogError::InvalidTarget {
        name: name.to_string(),
        message,
    };

    match entry {
        TargetEntry::Location(location) => {
            let location = Location::from(location);
            validate_location(&location).map_err(invalid)?;
            Ok(TargetSpec::Location(location))
        }
        TargetEntry::Enumerate {
            enumerate,
            subdirs,
            filter,
        } => {
            let parent = Location::from(enumerate);
            validate_location(&parent).map_err(invalid)?;
            if subdirs.is_empty() {
                return Err(invalid("enumerate target needs at least one subdir".to_string()));
            }
            if let Some(pattern) = &filter {
                glob::Pattern::new(pattern)
                    .map_err(|e| invalid(format!("invalid filter '{pattern}': {e}")))?;
            }
            Ok(TargetSpec::Enumerate {
                parent,
                subdirs,
                filter,
            })
        }
        TargetEntry::Glob { glob } => {
            glob::Pattern::new(&glob).map_err(|e| invalid(format!("invalid glob '{glob}': {e}")))?;
            Ok(TargetSpec::Glob { pattern: glob })
        }
    }
}

fn validate_location(location: &Location) -> Result<(), String> {
    match location {
        Location::Literal { path } if path.as_os_str().is_empty() => {
            Err("literal path is empty".to_string())
        }
        Location::EnvRelative { root, .. } if root.trim().is_empty() => {
            Err("root name is empty".to_string())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[operation]]
name = "User Temp Files"
kind = "plain-delete"
description = "Temporary files created by user applications"
targets = [{ env = "local_app_data", suffix = "Temp" }]

[[operation]]
name = "Crash Dumps"
kind = "composite-delete"
targets = [
    { path = "C:/Windows/Minidump" },
    { env = "local_app_data", suffix = "CrashDumps" },
]

[[operation]]
name = "Windows Store + UWP Cache"
kind = "enumerate-then-delete"
targets = [
    { enumerate = { env = "local_app_data", suffix = "Packages" }, subdirs = ["TempState", "AC", "LocalCache"] },
]

[[operation]]
name = "Firefox"
kind = "plain-delete"
targets = [{ glob = "{app_data}/Mozilla/Firefox/Profiles/*/cache2" }]

[[operation]]
name = "WinSxS Cleanup (DISM)"
kind = "external-tool"
program = "Dism.exe"
args = ["/Online", "/Cleanup-Image", "/StartComponentCleanup"]
"#;

    #[test]
    fn test_parse_sample_catalog_preserves_order() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        let names: Vec<&str> = catalog.operations().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "User Temp Files",
                "Crash Dumps",
                "Windows Store + UWP Cache",
                "Firefox",
                "WinSxS Cleanup (DISM)"
            ]
        );
    }

    #[test]
    fn test_parse_target_variants() {
        let catalog = parse_catalog(SAMPLE).unwrap();

        let temp = catalog.get("User Temp Files").unwrap();
        assert_eq!(
            temp.kind,
            OperationKind::PlainDelete {
                target: TargetSpec::env_relative("local_app_data", "Temp")
            }
        );
        assert_eq!(
            temp.description.as_deref(),
            Some("Temporary files created by user applications")
        );

        let dumps = catalog.get("Crash Dumps").unwrap();
        assert_eq!(
            dumps.targets(),
            &[
                TargetSpec::literal("C:/Windows/Minidump"),
                TargetSpec::env_relative("local_app_data", "CrashDumps"),
            ]
        );

        let store = catalog.get("Windows Store + UWP Cache").unwrap();
        assert!(matches!(
            &store.targets()[0],
            TargetSpec::Enumerate { subdirs, filter: None, .. } if subdirs.len() == 3
        ));

        let firefox = catalog.get("Firefox").unwrap();
        assert_eq!(
            firefox.targets(),
            &[TargetSpec::glob("{app_data}/Mozilla/Firefox/Profiles/*/cache2")]
        );

        let dism = catalog.get("WinSxS Cleanup (DISM)").unwrap();
        assert_eq!(
            dism.kind,
            OperationKind::ExternalTool {
                program: "Dism.exe".to_string(),
                args: vec![
                    "/Online".to_string(),
                    "/Cleanup-Image".to_string(),
                    "/StartComponentCleanup".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let content = r#"
[[operation]]
name = "Temp"
kind = "plain-delete"
targets = [{ path = "/tmp/a" }]

[[operation]]
name = "Temp"
kind = "plain-delete"
targets = [{ path = "/tmp/b" }]
"#;
        let err = parse_catalog(content).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName { name } if name == "Temp"));
    }

    #[test]
    fn test_delete_without_targets_rejected() {
        let content = r#"
[[operation]]
name = "Empty"
kind = "composite-delete"
"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::MissingTargets { .. })
        ));
    }

    #[test]
    fn test_external_tool_without_program_rejected() {
        let content = r#"
[[operation]]
name = "Tool"
kind = "external-tool"
"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::MissingProgram { .. })
        ));
    }

    #[test]
    fn test_plain_delete_with_two_targets_rejected() {
        let content = r#"
[[operation]]
name = "Logs"
kind = "plain-delete"
targets = [{ path = "/var/a" }, { path = "/var/b" }]
"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_enumerate_kind_requires_enumerate_targets() {
        let content = r#"
[[operation]]
name = "Packages"
kind = "enumerate-then-delete"
targets = [{ path = "/var/a" }]
"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let content = r#"
[[operation]]
name = "Broken"
kind = "plain-delete"
targets = [{ glob = "/tmp/[abc" }]
"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let content = r#"
[[operation]]
name = "Odd"
kind = "shred"
targets = [{ path = "/tmp" }]
"#;
        assert!(matches!(
            parse_catalog(content),
            Err(CatalogError::ParseFailed { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = load_catalog_file(&temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::ReadFailed { .. }));
    }

    #[test]
    fn test_load_catalog_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("catalog.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let catalog = load_catalog_file(&path).unwrap();
        assert_eq!(catalog.len(), 5);
    }
}
