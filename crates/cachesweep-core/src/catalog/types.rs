//! Operation catalog types.
//!
//! A catalog is pure data: which locations an operation touches and how it
//! is executed. Nothing here knows about a particular operating system; the
//! named roots used by [`Location::EnvRelative`] are supplied at resolution
//! time by a [`crate::paths::RootMap`].

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A base location: either an absolute path or a path under a named root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Location {
    Literal { path: PathBuf },
    EnvRelative { root: String, suffix: PathBuf },
}

/// Template describing how to obtain concrete filesystem targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum TargetSpec {
    /// A single location, returned unchanged once its root is resolved.
    Location(Location),
    /// List the immediate subdirectories of `parent` (optionally only those
    /// whose name matches `filter`), then descend into each of `subdirs`.
    Enumerate {
        parent: Location,
        subdirs: Vec<PathBuf>,
        filter: Option<String>,
    },
    /// Wildcard pattern. A leading `{root}` placeholder is replaced by the
    /// named root before expansion.
    Glob { pattern: String },
}

impl TargetSpec {
    pub fn literal(path: impl Into<PathBuf>) -> Self {
        TargetSpec::Location(Location::Literal { path: path.into() })
    }

    pub fn env_relative(root: impl Into<String>, suffix: impl Into<PathBuf>) -> Self {
        TargetSpec::Location(Location::EnvRelative {
            root: root.into(),
            suffix: suffix.into(),
        })
    }

    pub fn enumerate(parent: Location, subdirs: &[&str]) -> Self {
        TargetSpec::Enumerate {
            parent,
            subdirs: subdirs.iter().map(PathBuf::from).collect(),
            filter: None,
        }
    }

    pub fn glob(pattern: impl Into<String>) -> Self {
        TargetSpec::Glob {
            pattern: pattern.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Literal { path } => write!(f, "{}", path.display()),
            Location::EnvRelative { root, suffix } if suffix.as_os_str().is_empty() => {
                write!(f, "{{{root}}}")
            }
            Location::EnvRelative { root, suffix } => {
                write!(f, "{{{root}}}/{}", suffix.display())
            }
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::Location(location) => write!(f, "{location}"),
            TargetSpec::Enumerate {
                parent,
                subdirs,
                filter,
            } => {
                let subdirs: Vec<String> =
                    subdirs.iter().map(|s| s.display().to_string()).collect();
                write!(
                    f,
                    "{parent}/{}/{{{}}}",
                    filter.as_deref().unwrap_or("*"),
                    subdirs.join(",")
                )
            }
            TargetSpec::Glob { pattern } => write!(f, "{pattern}"),
        }
    }
}

/// How an operation is carried out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OperationKind {
    /// Delete the contents of a single target spec.
    PlainDelete { target: TargetSpec },
    /// Delete the contents of several unrelated target specs.
    CompositeDelete { targets: Vec<TargetSpec> },
    /// Delete per-package or per-profile caches found by enumeration.
    EnumerateThenDelete { targets: Vec<TargetSpec> },
    /// Run an external maintenance command with fixed arguments.
    ExternalTool { program: String, args: Vec<String> },
}

impl OperationKind {
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::PlainDelete { .. } => "plain-delete",
            OperationKind::CompositeDelete { .. } => "composite-delete",
            OperationKind::EnumerateThenDelete { .. } => "enumerate-then-delete",
            OperationKind::ExternalTool { .. } => "external-tool",
        }
    }

    /// Target specs of a delete operation. External tools have none.
    pub fn targets(&self) -> &[TargetSpec] {
        match self {
            OperationKind::PlainDelete { target } => std::slice::from_ref(target),
            OperationKind::CompositeDelete { targets }
            | OperationKind::EnumerateThenDelete { targets } => targets,
            OperationKind::ExternalTool { .. } => &[],
        }
    }
}

/// A named cleanup operation from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: OperationKind,
}

impl OperationSpec {
    pub fn new(name: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn targets(&self) -> &[TargetSpec] {
        self.kind.targets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_delete_exposes_single_target() {
        let op = OperationSpec::new(
            "Prefetch Files",
            OperationKind::PlainDelete {
                target: TargetSpec::literal("C:/Windows/Prefetch"),
            },
        );
        assert_eq!(op.targets().len(), 1);
        assert_eq!(op.kind.label(), "plain-delete");
    }

    #[test]
    fn test_external_tool_has_no_targets() {
        let kind = OperationKind::ExternalTool {
            program: "Dism.exe".to_string(),
            args: vec!["/Online".to_string()],
        };
        assert!(kind.targets().is_empty());
    }

    #[test]
    fn test_target_display() {
        assert_eq!(
            TargetSpec::env_relative("local_app_data", "Temp").to_string(),
            "{local_app_data}/Temp"
        );
        let spec = TargetSpec::Enumerate {
            parent: Location::EnvRelative {
                root: "local_app_data".to_string(),
                suffix: PathBuf::from("Packages"),
            },
            subdirs: vec![PathBuf::from("TempState"), PathBuf::from("AC")],
            filter: None,
        };
        assert_eq!(spec.to_string(), "{local_app_data}/Packages/*/{TempState,AC}");
    }

    #[test]
    fn test_operation_serializes_with_kind_tag() {
        let op = OperationSpec::new(
            "RDP Cache",
            OperationKind::PlainDelete {
                target: TargetSpec::literal("/tmp/rdp"),
            },
        )
        .with_description("Remote desktop bitmaps");
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "plain-delete");
        assert_eq!(json["name"], "RDP Cache");
        assert_eq!(json["description"], "Remote desktop bitmaps");
    }
}
