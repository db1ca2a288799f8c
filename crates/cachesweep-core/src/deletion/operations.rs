//! Content deletion for a single concrete target.
//!
//! Every item is removed independently: a failure is counted, written to the
//! run log with its reason, and traversal moves on to the next sibling. The
//! only errors returned to the caller are run log write failures.

use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::{SubdirAccounting, TargetResult};
use crate::cancel::CancellationToken;
use crate::journal::{RunLog, format_size};
use crate::usage;

pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10;

/// Deletes the contents of directories (or single files) while keeping
/// per-item accounting.
#[derive(Debug, Clone, Copy)]
pub struct DeletionEngine {
    accounting: SubdirAccounting,
    progress_every: u64,
}

impl Default for DeletionEngine {
    fn default() -> Self {
        Self::new(SubdirAccounting::default(), DEFAULT_PROGRESS_INTERVAL)
    }
}

impl DeletionEngine {
    /// `progress_every` is the number of successful removals between status
    /// messages; zero is treated as one.
    pub fn new(accounting: SubdirAccounting, progress_every: u64) -> Self {
        Self {
            accounting,
            progress_every: progress_every.max(1),
        }
    }

    pub fn accounting(&self) -> SubdirAccounting {
        self.accounting
    }

    /// Delete everything inside `path`, leaving `path` itself in place.
    ///
    /// A missing path (or a dangling link) contributes nothing. A link to a
    /// directory has the directory's contents deleted and the link kept. A
    /// regular file, or a link to one, is removed itself. Cancellation is checked before every item; once set,
    /// the counts gathered so far are returned.
    pub fn delete_contents(
        &self,
        path: &Path,
        cancel: &CancellationToken,
        log: &mut RunLog,
        progress: &mut dyn FnMut(&str),
    ) -> io::Result<TargetResult> {
        // The target itself is followed so a linked cache directory is
        // cleaned in place. Links below it are never followed.
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log.info(format!("Path does not exist, skipping: {}", path.display()))?;
                debug!(event = "core.deletion.target_missing", path = %path.display());
                return Ok(TargetResult::default());
            }
            Err(e) => {
                log.failure(format!("Access path: {}", path.display()), &e)?;
                return Ok(TargetResult::failure());
            }
        };

        info!(
            event = "core.deletion.target_started",
            path = %path.display(),
            accounting = %self.accounting
        );

        let mut tracker = ProgressTracker::new(self.progress_every, progress);

        if !metadata.is_dir() {
            if cancel.is_cancelled() {
                return Ok(TargetResult::default());
            }
            let link = match fs::symlink_metadata(path) {
                Ok(link) => link,
                Err(e) => {
                    log.failure(format!("Access path: {}", path.display()), &e)?;
                    return Ok(TargetResult::failure());
                }
            };
            let result = self.remove_file(path, link.file_type(), link.len(), log, &mut tracker)?;
            if result.success_count > 0 {
                log.success(format!("Deleted file: {}", path.display()))?;
            }
            return Ok(result);
        }

        log.info(format!("Starting to clean folder: {}", path.display()))?;
        let result = self.clean_dir(path, cancel, log, &mut tracker)?;
        log.info(format!(
            "Folder cleanup completed - Success: {}, Failed: {}, Freed: {}",
            result.success_count,
            result.failed_count,
            format_size(result.bytes_freed)
        ))?;

        info!(
            event = "core.deletion.target_completed",
            path = %path.display(),
            success = result.success_count,
            failed = result.failed_count,
            bytes_freed = result.bytes_freed,
            cancelled = cancel.is_cancelled()
        );
        Ok(result)
    }

    /// Post-order pass over one directory level: files first, then
    /// subdirectories.
    fn clean_dir(
        &self,
        dir: &Path,
        cancel: &CancellationToken,
        log: &mut RunLog,
        tracker: &mut ProgressTracker<'_>,
    ) -> io::Result<TargetResult> {
        let mut result = TargetResult::default();

        let listing = match list_children(dir) {
            Ok(listing) => listing,
            Err(e) => {
                log.failure(format!("Error walking directory: {}", dir.display()), &e)?;
                return Ok(TargetResult::failure());
            }
        };
        for (path, e) in &listing.unreadable {
            log.failure(format!("Read entry: {}", path.display()), e)?;
            result += TargetResult::failure();
        }

        for child in &listing.files {
            if cancel.is_cancelled() {
                return Ok(result);
            }
            let size = fs::symlink_metadata(&child.path).map(|m| m.len()).unwrap_or(0);
            result += self.remove_file(&child.path, child.file_type, size, log, tracker)?;
        }

        for subdir in &listing.dirs {
            if cancel.is_cancelled() {
                return Ok(result);
            }
            result += match self.accounting {
                SubdirAccounting::Collapsed => self.remove_subtree(subdir, log, tracker)?,
                SubdirAccounting::PerEntry => {
                    let inner = self.clean_dir(subdir, cancel, log, tracker)?;
                    if cancel.is_cancelled() {
                        return Ok(result + inner);
                    }
                    if inner.failed_count == 0 {
                        inner + self.remove_empty_dir(subdir, log, tracker)?
                    } else {
                        inner
                    }
                }
            };
        }

        Ok(result)
    }

    fn remove_file(
        &self,
        path: &Path,
        file_type: FileType,
        size: u64,
        log: &mut RunLog,
        tracker: &mut ProgressTracker<'_>,
    ) -> io::Result<TargetResult> {
        match remove_non_dir(path, file_type) {
            Ok(()) => {
                tracker.record(size);
                Ok(TargetResult::success(size))
            }
            Err(e) => {
                log.failure(format!("Delete file: {}", path.display()), &e)?;
                Ok(TargetResult::failure())
            }
        }
    }

    fn remove_subtree(
        &self,
        path: &Path,
        log: &mut RunLog,
        tracker: &mut ProgressTracker<'_>,
    ) -> io::Result<TargetResult> {
        let bytes = usage::measure(path).bytes;
        match fs::remove_dir_all(path) {
            Ok(()) => {
                tracker.record(bytes);
                Ok(TargetResult::success(bytes))
            }
            Err(e) => {
                log.failure(format!("Delete directory: {}", path.display()), &e)?;
                // Credit what remove_dir_all managed before it stopped.
                let freed = bytes.saturating_sub(usage::measure(path).bytes);
                Ok(TargetResult {
                    success_count: 0,
                    failed_count: 1,
                    bytes_freed: freed,
                })
            }
        }
    }

    fn remove_empty_dir(
        &self,
        path: &Path,
        log: &mut RunLog,
        tracker: &mut ProgressTracker<'_>,
    ) -> io::Result<TargetResult> {
        match fs::remove_dir(path) {
            Ok(()) => {
                tracker.record(0);
                Ok(TargetResult::success(0))
            }
            Err(e) => {
                log.failure(format!("Delete directory: {}", path.display()), &e)?;
                Ok(TargetResult::failure())
            }
        }
    }
}

struct Child {
    path: PathBuf,
    file_type: FileType,
}

#[derive(Default)]
struct Listing {
    files: Vec<Child>,
    dirs: Vec<PathBuf>,
    unreadable: Vec<(PathBuf, io::Error)>,
}

/// Split the immediate children of `dir` into files and directories.
/// Symlinks are treated as files so they are never followed.
fn list_children(dir: &Path) -> io::Result<Listing> {
    let mut listing = Listing::default();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                listing.unreadable.push((dir.to_path_buf(), e));
                continue;
            }
        };
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => listing.dirs.push(entry.path()),
            Ok(file_type) => listing.files.push(Child {
                path: entry.path(),
                file_type,
            }),
            Err(e) => listing.unreadable.push((entry.path(), e)),
        }
    }

    listing.files.sort_by(|a, b| a.path.cmp(&b.path));
    listing.dirs.sort();
    Ok(listing)
}

#[cfg(windows)]
fn remove_non_dir(path: &Path, file_type: FileType) -> io::Result<()> {
    // Directory symlinks and junctions need remove_dir on Windows.
    match fs::remove_file(path) {
        Err(e) if file_type.is_symlink() => fs::remove_dir(path).map_err(|_| e),
        other => other,
    }
}

#[cfg(not(windows))]
fn remove_non_dir(path: &Path, _file_type: FileType) -> io::Result<()> {
    fs::remove_file(path)
}

/// Emits "Deleted {n} files ({size} freed)" every `every` removals.
struct ProgressTracker<'p> {
    every: u64,
    removed: u64,
    bytes: u64,
    callback: &'p mut dyn FnMut(&str),
}

impl<'p> ProgressTracker<'p> {
    fn new(every: u64, callback: &'p mut dyn FnMut(&str)) -> Self {
        Self {
            every,
            removed: 0,
            bytes: 0,
            callback,
        }
    }

    fn record(&mut self, bytes: u64) {
        self.removed += 1;
        self.bytes += bytes;
        if self.removed % self.every == 0 {
            let status = format!(
                "Deleted {} files ({} freed)",
                self.removed,
                format_size(self.bytes)
            );
            (self.callback)(&status);
        }
    }
}
