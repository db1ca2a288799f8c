use super::types::WorkerState;
use crate::errors::SweepError;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Failed to create cleanup log in '{dir}': {source}")]
    JournalCreateFailed {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid worker state transition: {from} -> {to}")]
    InvalidTransition { from: WorkerState, to: WorkerState },

    #[error("Failed to start worker thread: {source}")]
    SpawnFailed {
        #[source]
        source: std::io::Error,
    },

    #[error("Worker thread panicked")]
    ThreadPanicked,
}

impl SweepError for WorkerError {
    fn error_code(&self) -> &'static str {
        match self {
            WorkerError::JournalCreateFailed { .. } => "WORKER_JOURNAL_CREATE_FAILED",
            WorkerError::InvalidTransition { .. } => "WORKER_INVALID_TRANSITION",
            WorkerError::SpawnFailed { .. } => "WORKER_SPAWN_FAILED",
            WorkerError::ThreadPanicked => "WORKER_THREAD_PANICKED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, WorkerError::JournalCreateFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let error = WorkerError::InvalidTransition {
            from: WorkerState::Completed,
            to: WorkerState::Running,
        };
        assert_eq!(
            error.to_string(),
            "Invalid worker state transition: completed -> running"
        );
        assert_eq!(error.error_code(), "WORKER_INVALID_TRANSITION");
        assert!(!error.is_user_error());
    }
}
