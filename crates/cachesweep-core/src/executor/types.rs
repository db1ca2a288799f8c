use serde::Serialize;

use crate::deletion::TargetResult;

/// Totals for one operation of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationResult {
    pub name: String,
    #[serde(flatten)]
    pub totals: TargetResult,
}

impl OperationResult {
    pub fn new(name: impl Into<String>, totals: TargetResult) -> Self {
        Self {
            name: name.into(),
            totals,
        }
    }

    pub fn success_count(&self) -> u64 {
        self.totals.success_count
    }

    pub fn failed_count(&self) -> u64 {
        self.totals.failed_count
    }

    pub fn bytes_freed(&self) -> u64 {
        self.totals.bytes_freed
    }
}
