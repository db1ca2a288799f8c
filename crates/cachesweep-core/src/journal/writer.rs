//! Append-only per-run cleanup log.
//!
//! Layout:
//!
//! ```text
//! ============================================================
//! <AppName> - CLEANUP REPORT
//! Version <X.Y>
//! ============================================================
//! Cleanup performed on: <YYYY-MM-DD at HH:MM>
//! ------------------------------------------------------------
//!
//! [HH:MM:SS] [INFO] Selected operations: <comma list>
//! [HH:MM:SS] [FAILED] <message>
//!          Reason: <error text>
//!
//! ============================================================
//! CLEANUP SUMMARY
//! ============================================================
//! ...
//! ```
//!
//! Lines are flushed as they are written, so a run that dies mid-way leaves
//! a readable log without the summary footer.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use super::format::{format_size, log_file_name};
use crate::worker::types::RunSummary;

const HEAVY_RULE: &str = "============================================================";
const LIGHT_RULE: &str = "------------------------------------------------------------";
pub(crate) const SUMMARY_TITLE: &str = "CLEANUP SUMMARY";

/// Continuation indent for the `Reason:` line under a FAILED entry.
const REASON_INDENT: &str = "         ";

const MAX_NAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Failed,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Success => write!(f, "SUCCESS"),
            LogLevel::Failed => write!(f, "FAILED"),
        }
    }
}

/// Identity written into the log header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHeader {
    pub app_name: String,
    pub version: String,
}

impl LogHeader {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            version: format!(
                "{}.{}",
                env!("CARGO_PKG_VERSION_MAJOR"),
                env!("CARGO_PKG_VERSION_MINOR")
            ),
        }
    }
}

/// Writer for one run's log.
pub struct RunLog {
    writer: Box<dyn Write + Send>,
    path: Option<PathBuf>,
}

impl fmt::Debug for RunLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLog").field("path", &self.path).finish()
    }
}

impl RunLog {
    /// Create a new log file in `dir` and write the header.
    ///
    /// The name has minute granularity; a second run within the same minute
    /// gets a numbered suffix rather than overwriting the earlier log.
    pub fn create(dir: &Path, header: &LogHeader) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let started = Local::now();
        let (path, file) = create_unique(dir, &started)?;

        let mut log = Self {
            writer: Box::new(LineWriter::new(file)),
            path: Some(path),
        };
        log.write_header(header, &started)?;

        info!(
            event = "core.journal.created",
            path = %log.path().map(|p| p.display().to_string()).unwrap_or_default()
        );
        Ok(log)
    }

    /// A log that drops everything it is given.
    pub fn discard() -> Self {
        Self {
            writer: Box::new(io::sink()),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.entry(LogLevel::Info, message)
    }

    pub fn success(&mut self, message: impl fmt::Display) -> io::Result<()> {
        self.entry(LogLevel::Success, message)
    }

    pub fn failure(&mut self, message: impl fmt::Display, reason: impl fmt::Display) -> io::Result<()> {
        self.entry(LogLevel::Failed, message)?;
        writeln!(self.writer, "{REASON_INDENT}Reason: {reason}")
    }

    pub fn blank_line(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Write the summary footer and flush. Returns the log path, if any.
    pub fn finish(mut self, summary: &RunSummary) -> io::Result<Option<PathBuf>> {
        let w = &mut self.writer;
        writeln!(w)?;
        writeln!(w, "{HEAVY_RULE}")?;
        writeln!(w, "{SUMMARY_TITLE}")?;
        writeln!(w, "{HEAVY_RULE}")?;
        writeln!(w, "Total operations performed: {}", summary.operations_performed)?;
        writeln!(w, "Successful file operations: {}", summary.total_success)?;
        writeln!(w, "Failed file operations: {}", summary.total_failed)?;
        writeln!(w, "Space freed: {}", format_size(summary.total_bytes_freed))?;
        writeln!(w, "Total time taken: {:.2} seconds", summary.elapsed_secs())?;
        writeln!(w, "Cleanup completed at: {}", summary.end_time.format("%H:%M"))?;
        writeln!(w, "{HEAVY_RULE}")?;
        w.flush()?;

        Ok(self.path.take())
    }

    fn write_header(&mut self, header: &LogHeader, started: &DateTime<Local>) -> io::Result<()> {
        let w = &mut self.writer;
        writeln!(w, "{HEAVY_RULE}")?;
        writeln!(w, "{} - CLEANUP REPORT", header.app_name)?;
        writeln!(w, "Version {}", header.version)?;
        writeln!(w, "{HEAVY_RULE}")?;
        writeln!(w, "Cleanup performed on: {}", started.format("%Y-%m-%d at %H:%M"))?;
        writeln!(w, "{LIGHT_RULE}")?;
        writeln!(w)
    }

    fn entry(&mut self, level: LogLevel, message: impl fmt::Display) -> io::Result<()> {
        writeln!(
            self.writer,
            "[{}] [{level}] {message}",
            Local::now().format("%H:%M:%S")
        )
    }
}

fn create_unique(dir: &Path, started: &DateTime<Local>) -> io::Result<(PathBuf, File)> {
    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let path = dir.join(log_file_name(started, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }
    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!(
            "too many cleanup logs for {} in {}",
            started.format("%Y-%m-%d %H:%M"),
            dir.display()
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::types::WorkerState;
    use tempfile::TempDir;

    fn header() -> LogHeader {
        LogHeader {
            app_name: "Cache Sweep".to_string(),
            version: "2.0".to_string(),
        }
    }

    fn summary() -> RunSummary {
        let start = Local::now();
        RunSummary {
            operations_performed: 2,
            total_success: 7,
            total_failed: 1,
            total_bytes_freed: 2048,
            start_time: start,
            end_time: start + chrono::Duration::milliseconds(1500),
            outcome: WorkerState::Completed,
            log_path: None,
            operations: Vec::new(),
        }
    }

    #[test]
    fn test_create_writes_header() {
        let temp = TempDir::new().unwrap();
        let log = RunLog::create(temp.path(), &header()).unwrap();
        let path = log.path().unwrap().to_path_buf();
        drop(log);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], HEAVY_RULE);
        assert_eq!(lines[1], "Cache Sweep - CLEANUP REPORT");
        assert_eq!(lines[2], "Version 2.0");
        assert_eq!(lines[3], HEAVY_RULE);
        assert!(lines[4].starts_with("Cleanup performed on: "));
        assert!(lines[4].contains(" at "));
        assert_eq!(lines[5], LIGHT_RULE);
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("cleanup_log_")
        );
    }

    #[test]
    fn test_failure_has_reason_line() {
        let temp = TempDir::new().unwrap();
        let mut log = RunLog::create(temp.path(), &header()).unwrap();
        log.info("Selected operations: Temp, Logs").unwrap();
        log.failure("Delete file: /tmp/x", "Permission denied").unwrap();
        let path = log.path().unwrap().to_path_buf();
        drop(log);

        let content = fs::read_to_string(&path).unwrap();
        let body: Vec<&str> = content.lines().skip(7).collect();
        assert!(body[0].ends_with("[INFO] Selected operations: Temp, Logs"));
        assert!(body[0].starts_with('['));
        assert_eq!(&body[0][9..11], "] ");
        assert!(body[1].ends_with("[FAILED] Delete file: /tmp/x"));
        assert_eq!(body[2], "         Reason: Permission denied");
    }

    #[test]
    fn test_finish_writes_footer() {
        let temp = TempDir::new().unwrap();
        let mut log = RunLog::create(temp.path(), &header()).unwrap();
        log.success("Deleted icon cache").unwrap();
        let path = log.finish(&summary()).unwrap().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[SUCCESS] Deleted icon cache"));
        assert!(content.contains("\nCLEANUP SUMMARY\n"));
        assert!(content.contains("Total operations performed: 2\n"));
        assert!(content.contains("Successful file operations: 7\n"));
        assert!(content.contains("Failed file operations: 1\n"));
        assert!(content.contains("Space freed: 2.00 KB\n"));
        assert!(content.contains("Total time taken: 1.50 seconds\n"));
        assert!(content.contains("Cleanup completed at: "));
        assert!(content.trim_end().ends_with(HEAVY_RULE));
    }

    #[test]
    fn test_same_minute_runs_do_not_overwrite() {
        let temp = TempDir::new().unwrap();
        let first = RunLog::create(temp.path(), &header()).unwrap();
        let second = RunLog::create(temp.path(), &header()).unwrap();
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn test_discard_accepts_writes() {
        let mut log = RunLog::discard();
        log.info("ignored").unwrap();
        assert!(log.path().is_none());
        assert!(log.finish(&summary()).unwrap().is_none());
    }
}
