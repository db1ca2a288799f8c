use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::deletion::TargetResult;
use crate::executor::OperationResult;

/// Lifecycle of a [`Worker`](super::Worker): `Idle -> Running -> Completed | Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl WorkerState {
    pub fn can_transition_to(self, next: WorkerState) -> bool {
        matches!(
            (self, next),
            (WorkerState::Idle, WorkerState::Running)
                | (WorkerState::Running, WorkerState::Completed)
                | (WorkerState::Running, WorkerState::Cancelled)
        )
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerState::Idle => write!(f, "idle"),
            WorkerState::Running => write!(f, "running"),
            WorkerState::Completed => write!(f, "completed"),
            WorkerState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Notifications sent from a running worker to its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// Coarse per-operation progress, 0-100.
    Progress(u8),
    Status(String),
    OperationStarted(String),
    OperationCompleted {
        name: String,
        success_count: u64,
        failed_count: u64,
        bytes_freed: u64,
    },
    Error(String),
    RunCompleted(RunSummary),
}

impl WorkerEvent {
    pub(crate) fn completed(result: &OperationResult) -> Self {
        WorkerEvent::OperationCompleted {
            name: result.name.clone(),
            success_count: result.success_count(),
            failed_count: result.failed_count(),
            bytes_freed: result.bytes_freed(),
        }
    }
}

/// Totals for one run.
///
/// `operations` holds one entry per operation that was started, including
/// ones that failed unexpectedly (recorded as a single failure). The totals
/// are always the element-wise sum of those entries, while
/// `operations_performed` only counts operations that finished normally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub operations_performed: u64,
    pub total_success: u64,
    pub total_failed: u64,
    pub total_bytes_freed: u64,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub outcome: WorkerState,
    pub log_path: Option<PathBuf>,
    pub operations: Vec<OperationResult>,
}

impl RunSummary {
    pub(crate) fn new(
        operations_performed: u64,
        operations: Vec<OperationResult>,
        start_time: DateTime<Local>,
        outcome: WorkerState,
    ) -> Self {
        let totals: TargetResult = operations.iter().map(|op| op.totals).sum();
        Self {
            operations_performed,
            total_success: totals.success_count,
            total_failed: totals.failed_count,
            total_bytes_freed: totals.bytes_freed,
            start_time,
            end_time: Local::now(),
            outcome,
            log_path: None,
            operations,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds().max(0) as f64 / 1000.0
    }

    pub fn was_cancelled(&self) -> bool {
        self.outcome == WorkerState::Cancelled
    }
}
