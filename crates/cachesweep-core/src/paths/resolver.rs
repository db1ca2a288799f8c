//! Expansion of [`TargetSpec`] templates into concrete paths.
//!
//! Resolution only reads the filesystem (directory listings and glob
//! expansion). It never fails: missing parents, unreadable directories,
//! unknown roots and bad patterns all produce an empty result and a trace
//! event.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::roots::RootMap;
use crate::catalog::types::{Location, TargetSpec};

/// Resolves target specs against a set of named roots.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    roots: &'a RootMap,
}

impl<'a> PathResolver<'a> {
    pub fn new(roots: &'a RootMap) -> Self {
        Self { roots }
    }

    /// Expand one target spec. Order follows the directory listing and is not
    /// stable across platforms.
    pub fn resolve(&self, spec: &TargetSpec) -> Vec<PathBuf> {
        let resolved = match spec {
            TargetSpec::Location(location) => self.location(location).into_iter().collect(),
            TargetSpec::Enumerate {
                parent,
                subdirs,
                filter,
            } => match self.location(parent) {
                Some(parent) => enumerate_then_descend(&parent, subdirs, filter.as_deref()),
                None => Vec::new(),
            },
            TargetSpec::Glob { pattern } => match self.expand_placeholder(pattern) {
                Some(pattern) => expand_glob(&pattern),
                None => Vec::new(),
            },
        };

        debug!(
            event = "core.paths.resolve_completed",
            spec = %spec,
            count = resolved.len()
        );
        resolved
    }

    /// Expand several specs, dropping paths already produced by an earlier
    /// spec so each concrete target is visited once.
    pub fn resolve_all(&self, specs: &[TargetSpec]) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        specs
            .iter()
            .flat_map(|spec| self.resolve(spec))
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }

    fn location(&self, location: &Location) -> Option<PathBuf> {
        match location {
            Location::Literal { path } => Some(path.clone()),
            Location::EnvRelative { root, suffix } => match self.roots.get(root) {
                Some(base) if suffix.as_os_str().is_empty() => Some(base.to_path_buf()),
                Some(base) => Some(base.join(suffix)),
                None => {
                    warn!(event = "core.paths.root_undefined", root = %root);
                    None
                }
            },
        }
    }

    /// Replace a leading `{root}` placeholder with the escaped root path.
    fn expand_placeholder(&self, pattern: &str) -> Option<String> {
        let Some(rest) = pattern.strip_prefix('{') else {
            return Some(pattern.to_string());
        };
        let Some((root, tail)) = rest.split_once('}') else {
            return Some(pattern.to_string());
        };

        match self.roots.get(root) {
            Some(base) => {
                let escaped = glob::Pattern::escape(&base.to_string_lossy());
                Some(format!("{escaped}{tail}"))
            }
            None => {
                warn!(event = "core.paths.root_undefined", root = %root);
                None
            }
        }
    }
}

fn enumerate_then_descend(parent: &Path, subdirs: &[PathBuf], filter: Option<&str>) -> Vec<PathBuf> {
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(
                event = "core.paths.enumerate_skipped",
                parent = %parent.display(),
                error = %e
            );
            return Vec::new();
        }
    };

    let filter = filter.and_then(|f| glob::Pattern::new(f).ok());

    let mut children: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter(|entry| {
            filter
                .as_ref()
                .is_none_or(|f| f.matches(&entry.file_name().to_string_lossy()))
        })
        .map(|entry| entry.path())
        .collect();
    // Listing order is filesystem-defined; sort so one run is at least
    // self-consistent between analysis and deletion.
    children.sort();

    children
        .iter()
        .flat_map(|child| subdirs.iter().map(move |suffix| child.join(suffix)))
        .collect()
}

fn expand_glob(pattern: &str) -> Vec<PathBuf> {
    match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(e) => {
            warn!(
                event = "core.paths.glob_invalid",
                pattern = %pattern,
                error = %e
            );
            Vec::new()
        }
    }
}
