use tracing::{info, warn};

use super::errors::OperationError;
use super::external;
use super::types::OperationResult;
use crate::cancel::CancellationToken;
use crate::catalog::{OperationKind, OperationSpec};
use crate::deletion::{DeletionEngine, TargetResult};
use crate::journal::{RunLog, format_size};
use crate::paths::{PathResolver, RootMap};

/// Interprets an [`OperationSpec`] against the filesystem.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'a> {
    resolver: PathResolver<'a>,
    engine: DeletionEngine,
}

impl<'a> Executor<'a> {
    pub fn new(roots: &'a RootMap, engine: DeletionEngine) -> Self {
        Self {
            resolver: PathResolver::new(roots),
            engine,
        }
    }

    /// Run one operation and return its totals.
    ///
    /// Per-item problems are counted in the result. `Err` is reserved for
    /// failures of the run log itself.
    pub fn execute(
        &self,
        spec: &OperationSpec,
        cancel: &CancellationToken,
        log: &mut RunLog,
        progress: &mut dyn FnMut(&str),
    ) -> Result<OperationResult, OperationError> {
        let name = spec.name.as_str();
        info!(
            event = "core.executor.operation_started",
            operation = name,
            kind = spec.kind.label()
        );
        log.info(format!("Starting {name}..."))?;
        progress(&format!("Cleaning: {name}"));

        let totals = match &spec.kind {
            OperationKind::ExternalTool { program, args } => {
                external::run_tool(program, args, log)?
            }
            OperationKind::PlainDelete { .. }
            | OperationKind::CompositeDelete { .. }
            | OperationKind::EnumerateThenDelete { .. } => {
                self.delete_targets(spec, cancel, log, progress)?
            }
        };

        log.info(format!(
            "{name} completed - Success: {}, Failed: {}, Freed: {}",
            totals.success_count,
            totals.failed_count,
            format_size(totals.bytes_freed)
        ))?;
        info!(
            event = "core.executor.operation_completed",
            operation = name,
            success = totals.success_count,
            failed = totals.failed_count,
            bytes_freed = totals.bytes_freed
        );

        Ok(OperationResult::new(name, totals))
    }

    fn delete_targets(
        &self,
        spec: &OperationSpec,
        cancel: &CancellationToken,
        log: &mut RunLog,
        progress: &mut dyn FnMut(&str),
    ) -> Result<TargetResult, OperationError> {
        let paths = self.resolver.resolve_all(spec.targets());
        if paths.is_empty() {
            log.info(format!("No locations found for {}", spec.name))?;
            return Ok(TargetResult::default());
        }

        let mut prefixed = |status: &str| progress(&format!("{}: {status}", spec.name));
        let mut totals = TargetResult::default();
        for path in &paths {
            if cancel.is_cancelled() {
                warn!(
                    event = "core.executor.operation_cancelled",
                    operation = %spec.name,
                    path = %path.display()
                );
                break;
            }
            totals += self
                .engine
                .delete_contents(path, cancel, log, &mut prefixed)?;
        }
        Ok(totals)
    }
}
