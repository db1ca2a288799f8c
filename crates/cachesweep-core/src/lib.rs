//! cachesweep-core: catalog-driven bulk cache deletion engine
//!
//! Operations are described as data (an [`OperationSpec`] catalog), resolved
//! against named filesystem roots, and executed by a cancellable worker that
//! keeps per-item accounting and writes an audit log for every run.
//!
//! # Main Entry Points
//!
//! - [`catalog`] - Load and select operations
//! - [`worker`] - Run a selection with progress events and cancellation
//! - [`analyzer`] - Preview what a selection would remove
//! - [`journal`] - Run logs and their history
//! - [`config`] - Configuration management

pub mod analyzer;
pub mod cancel;
pub mod catalog;
pub mod config;
pub mod deletion;
pub mod errors;
pub mod events;
pub mod executor;
pub mod journal;
pub mod logging;
pub mod paths;
pub mod usage;
pub mod worker;

// Re-export commonly used types at crate root for convenience
pub use analyzer::{Analysis, AnalysisReport, Analyzer, OperationAnalysis};
pub use cancel::CancellationToken;
pub use catalog::{Catalog, CatalogError, Location, OperationKind, OperationSpec, TargetSpec};
pub use config::{Config, SweepConfig};
pub use deletion::{DeletionEngine, SubdirAccounting, TargetResult};
pub use errors::{ConfigError, SweepError};
pub use executor::{Executor, OperationError, OperationResult};
pub use journal::{LogFileInfo, LogHeader, RunLog, format_size};
pub use paths::{PathResolver, RootMap};
pub use worker::{
    CallbackSink, EventSink, NullSink, RunSummary, Worker, WorkerError, WorkerEvent,
    WorkerHandle, WorkerState,
};

// Re-export logging initialization
pub use logging::init_logging;
