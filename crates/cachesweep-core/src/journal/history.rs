//! Read-only inspection of logs left by earlier runs.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, warn};

use super::format::is_log_file_name;
use super::writer::SUMMARY_TITLE;

const SPACE_FREED_PREFIX: &str = "Space freed: ";

#[derive(Debug, Clone, Serialize)]
pub struct LogFileInfo {
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    /// False when the summary footer is missing, i.e. the run did not finish.
    pub complete: bool,
    /// `Space freed` value from the footer, as written.
    pub space_freed: Option<String>,
}

/// Cleanup logs in `dir`, newest first. A missing directory has no logs.
pub fn list_logs(dir: &Path) -> io::Result<Vec<LogFileInfo>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(event = "core.journal.history_dir_missing", dir = %dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut logs = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if !is_log_file_name(&name.to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(time) => DateTime::<Local>::from(time),
            Err(e) => {
                warn!(
                    event = "core.journal.history_entry_unreadable",
                    path = %path.display(),
                    error = %e
                );
                continue;
            }
        };

        let footer = read_footer(&path).unwrap_or_default();
        logs.push(LogFileInfo {
            path,
            modified,
            complete: footer.complete,
            space_freed: footer.space_freed,
        });
    }

    logs.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.path.cmp(&a.path)));
    Ok(logs)
}

/// Whether the log at `path` has a summary footer.
pub fn is_complete(path: &Path) -> io::Result<bool> {
    read_footer(path).map(|footer| footer.complete)
}

#[derive(Debug, Default)]
struct Footer {
    complete: bool,
    space_freed: Option<String>,
}

fn read_footer(path: &Path) -> io::Result<Footer> {
    let reader = BufReader::new(File::open(path)?);
    let mut footer = Footer::default();

    for line in reader.lines() {
        let line = line?;
        if line == SUMMARY_TITLE {
            footer.complete = true;
        } else if footer.complete {
            if let Some(size) = line.strip_prefix(SPACE_FREED_PREFIX) {
                footer.space_freed = Some(size.to_string());
            }
        }
    }
    Ok(footer)
}
