//! Named filesystem roots used by environment-relative targets.
//!
//! The engine never hard-codes platform locations. A [`RootMap`] is built
//! once per run from the platform defaults plus any `[roots]` overrides in
//! the configuration, and handed to the resolver.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Mapping from root name (e.g. `local_app_data`) to an absolute directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootMap {
    roots: BTreeMap<String, PathBuf>,
}

impl RootMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roots discovered from the current platform.
    ///
    /// | name             | source                                        |
    /// |------------------|-----------------------------------------------|
    /// | `home`           | home directory                                |
    /// | `cache`          | per-user cache directory                      |
    /// | `data`           | per-user data directory                       |
    /// | `local_app_data` | `%LOCALAPPDATA%`, else local data directory   |
    /// | `app_data`       | `%APPDATA%`, else data directory              |
    /// | `program_data`   | `%ProgramData%`                               |
    /// | `system_root`    | `%SystemRoot%` / `%windir%`                   |
    /// | `temp`           | system temporary directory                    |
    ///
    /// Roots that cannot be determined are left out; targets that use them
    /// resolve to nothing.
    pub fn from_platform() -> Self {
        let mut map = Self::new();

        map.insert_opt("home", dirs::home_dir());
        map.insert_opt("cache", dirs::cache_dir());
        map.insert_opt("data", dirs::data_dir());
        map.insert_opt(
            "local_app_data",
            env_dir("LOCALAPPDATA").or_else(dirs::data_local_dir),
        );
        map.insert_opt("app_data", env_dir("APPDATA").or_else(dirs::data_dir));
        map.insert_opt("program_data", env_dir("ProgramData"));
        map.insert_opt(
            "system_root",
            env_dir("SystemRoot").or_else(|| env_dir("windir")),
        );
        map.insert("temp", std::env::temp_dir());

        debug!(
            event = "core.paths.platform_roots_discovered",
            roots = ?map.names().collect::<Vec<_>>()
        );
        map
    }

    pub fn with_root(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.insert(name, path);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.roots.insert(name.into(), path.into());
    }

    /// Apply overrides; later values replace platform defaults.
    pub fn extend<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PathBuf>,
    {
        for (name, path) in overrides {
            self.insert(name, path);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.roots.get(name).map(PathBuf::as_path)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.roots.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    fn insert_opt(&mut self, name: &str, path: Option<PathBuf>) {
        if let Some(path) = path {
            self.insert(name, path);
        }
    }
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
