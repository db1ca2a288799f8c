use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use chrono::Local;
use tracing::{error, info, warn};

use super::errors::WorkerError;
use super::sink::EventSink;
use super::types::{RunSummary, WorkerEvent, WorkerState};
use crate::cancel::CancellationToken;
use crate::catalog::OperationSpec;
use crate::deletion::{DeletionEngine, TargetResult};
use crate::executor::{Executor, OperationError, OperationResult};
use crate::journal::{LogHeader, RunLog, format_size};
use crate::paths::RootMap;

pub const DEFAULT_APP_NAME: &str = "Cache Sweep";

/// Runs a selection of operations in order, owning the run log and emitting
/// progress to an [`EventSink`].
#[derive(Debug)]
pub struct Worker {
    operations: Vec<OperationSpec>,
    roots: RootMap,
    engine: DeletionEngine,
    log_dir: PathBuf,
    header: LogHeader,
    cancel: CancellationToken,
    state: WorkerState,
}

impl Worker {
    pub fn new(operations: Vec<OperationSpec>, roots: RootMap, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            operations,
            roots,
            engine: DeletionEngine::default(),
            log_dir: log_dir.into(),
            header: LogHeader::new(DEFAULT_APP_NAME),
            cancel: CancellationToken::new(),
            state: WorkerState::Idle,
        }
    }

    pub fn with_engine(mut self, engine: DeletionEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_header(mut self, header: LogHeader) -> Self {
        self.header = header;
        self
    }

    /// Share an existing token, e.g. one wired to a signal handler.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Run every selected operation on the current thread.
    ///
    /// Failures inside operations are counted and reported through `sink`;
    /// `Err` only means the run could not start.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> Result<RunSummary, WorkerError> {
        if !self.state.can_transition_to(WorkerState::Running) {
            return Err(WorkerError::InvalidTransition {
                from: self.state,
                to: WorkerState::Running,
            });
        }

        let start_time = Local::now();
        let mut log = RunLog::create(&self.log_dir, &self.header).map_err(|e| {
            error!(
                event = "core.worker.journal_create_failed",
                dir = %self.log_dir.display(),
                error = %e
            );
            WorkerError::JournalCreateFailed {
                dir: self.log_dir.display().to_string(),
                source: e,
            }
        })?;
        self.transition(WorkerState::Running)?;

        let total = self.operations.len();
        info!(event = "core.worker.run_started", operations = total);

        let names: Vec<&str> = self.operations.iter().map(|op| op.name.as_str()).collect();
        record(sink, log.info(format!("Selected operations: {}", names.join(", "))));
        record(sink, log.blank_line());

        let executor = Executor::new(&self.roots, self.engine);
        let mut performed = 0u64;
        let mut results = Vec::with_capacity(total);
        let mut stopped_early = false;

        for (idx, op) in self.operations.iter().enumerate() {
            if self.cancel.is_cancelled() {
                info!(event = "core.worker.run_cancelled", completed = idx, total = total);
                record(sink, log.info("Cleanup cancelled by user"));
                stopped_early = true;
                break;
            }

            sink.emit(WorkerEvent::OperationStarted(op.name.clone()));
            sink.emit(WorkerEvent::Progress(percent(idx, total)));
            record(sink, log.info(format!("Starting operation: {}", op.name)));

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                let mut on_status = |status: &str| sink.emit(WorkerEvent::Status(status.to_string()));
                executor.execute(op, &self.cancel, &mut log, &mut on_status)
            }))
            .unwrap_or_else(|payload| {
                Err(OperationError::Panicked {
                    name: op.name.clone(),
                    message: panic_message(payload.as_ref()),
                })
            });
            // Seen while the operation ran, so its targets may be cut short.
            stopped_early |= self.cancel.is_cancelled();

            match outcome {
                Ok(result) => {
                    performed += 1;
                    record(
                        sink,
                        log.info(format!(
                            "Completed operation: {} - Success: {}, Failed: {}, Freed: {}",
                            result.name,
                            result.success_count(),
                            result.failed_count(),
                            format_size(result.bytes_freed())
                        )),
                    );
                    sink.emit(WorkerEvent::completed(&result));
                    results.push(result);
                }
                Err(e) => {
                    error!(
                        event = "core.worker.operation_failed",
                        operation = %op.name,
                        error = %e
                    );
                    record(sink, log.failure(format!("Operation: {}", op.name), &e));
                    sink.emit(WorkerEvent::Error(format!("Error in {}: {e}", op.name)));
                    results.push(OperationResult::new(op.name.clone(), TargetResult::failure()));
                }
            }
            record(sink, log.blank_line());
        }

        sink.emit(WorkerEvent::Progress(100));

        let terminal = if stopped_early {
            WorkerState::Cancelled
        } else {
            WorkerState::Completed
        };
        let mut summary = RunSummary::new(performed, results, start_time, terminal);
        summary.log_path = log.path().map(Path::to_path_buf);
        record(sink, log.finish(&summary).map(|_| ()));
        self.transition(terminal)?;

        info!(
            event = "core.worker.run_completed",
            outcome = %terminal,
            operations = summary.operations_performed,
            success = summary.total_success,
            failed = summary.total_failed,
            bytes_freed = summary.total_bytes_freed
        );
        sink.emit(WorkerEvent::RunCompleted(summary.clone()));
        Ok(summary)
    }

    /// Run on a background thread. Events go to `sink`; the returned handle
    /// can cancel the run and wait for its summary.
    pub fn spawn<S>(mut self, mut sink: S) -> Result<WorkerHandle, WorkerError>
    where
        S: EventSink + Send + 'static,
    {
        let cancel = self.cancel.clone();
        let thread = thread::Builder::new()
            .name("cachesweep-worker".to_string())
            .spawn(move || self.run(&mut sink))
            .map_err(|source| WorkerError::SpawnFailed { source })?;

        Ok(WorkerHandle { thread, cancel })
    }

    fn transition(&mut self, next: WorkerState) -> Result<(), WorkerError> {
        if !self.state.can_transition_to(next) {
            return Err(WorkerError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

/// Handle to a worker running on its own thread.
#[derive(Debug)]
pub struct WorkerHandle {
    thread: JoinHandle<Result<RunSummary, WorkerError>>,
    cancel: CancellationToken,
}

impl WorkerHandle {
    /// Ask the worker to stop before its next target or operation.
    pub fn cancel(&self) {
        info!(event = "core.worker.cancel_requested");
        self.cancel.cancel();
    }

    pub fn join(self) -> Result<RunSummary, WorkerError> {
        self.thread.join().map_err(|_| WorkerError::ThreadPanicked)?
    }
}

fn percent(idx: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (idx * 100 / total).min(100) as u8
}

/// Run log write failures do not stop the run; they are reported instead.
fn record(sink: &mut dyn EventSink, result: io::Result<()>) {
    if let Err(e) = result {
        warn!(event = "core.worker.journal_write_failed", error = %e);
        sink.emit(WorkerEvent::Error(format!("Failed to write cleanup log: {e}")));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
