//! Shared fixture for CLI integration tests.
//!
//! Every test runs the binary inside its own temp directory with
//! `CACHESWEEP_HOME` pointed there, so no user config or real log
//! directory is touched.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

pub struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    /// A sandbox with a catalog of two operations over `cache/`:
    /// "Sample Cache" (three files, 600 bytes) and "Missing Cache" (no such dir).
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let sandbox = Self { temp };

        let cache = sandbox.cache_dir();
        fs::create_dir_all(&cache).expect("Failed to create cache dir");
        fs::write(cache.join("a.bin"), vec![0u8; 100]).unwrap();
        fs::write(cache.join("b.bin"), vec![0u8; 200]).unwrap();
        fs::write(cache.join("c.bin"), vec![0u8; 300]).unwrap();

        let catalog = format!(
            r#"
[[operation]]
name = "Sample Cache"
kind = "plain-delete"
description = "Files under the sandbox cache"
targets = [{{ path = '{}' }}]

[[operation]]
name = "Missing Cache"
kind = "composite-delete"
targets = [{{ path = '{}' }}]
"#,
            cache.display(),
            sandbox.path().join("does-not-exist").display()
        );
        fs::write(sandbox.catalog_path(), catalog).expect("Failed to write catalog");
        sandbox
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.path().join("cache")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.path().join("catalog.toml")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.path().join("logs")
    }

    pub fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_cachesweep"));
        command
            .current_dir(self.path())
            .env("CACHESWEEP_HOME", self.path().join("home"))
            .env_remove("RUST_LOG")
            .stdin(Stdio::null());
        command
    }

    /// Run with the sandbox catalog and log directory.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .arg("--catalog")
            .arg(self.catalog_path())
            .arg("--log-dir")
            .arg(self.log_dir())
            .args(args)
            .output()
            .expect("Failed to execute cachesweep")
    }

    pub fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "cachesweep {:?} failed with exit code {:?}. stderr: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run_ok(args);
        let stdout = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&stdout)
            .unwrap_or_else(|e| panic!("stdout should be valid JSON ({e}): {stdout}"))
    }
}
