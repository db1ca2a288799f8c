use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::usage::DiskUsage;

/// Preview of what an operation would remove.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub total_bytes: u64,
    pub total_files: u64,
    pub total_dirs: u64,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<DiskUsage> for Analysis {
    fn from(usage: DiskUsage) -> Self {
        Self {
            total_bytes: usage.bytes,
            total_files: usage.files,
            total_dirs: usage.dirs,
        }
    }
}

impl Add for Analysis {
    type Output = Analysis;

    fn add(self, rhs: Self) -> Self::Output {
        Analysis {
            total_bytes: self.total_bytes + rhs.total_bytes,
            total_files: self.total_files + rhs.total_files,
            total_dirs: self.total_dirs + rhs.total_dirs,
        }
    }
}

impl AddAssign for Analysis {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Analysis {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Analysis::default(), Add::add)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationAnalysis {
    pub name: String,
    pub kind: &'static str,
    /// Concrete locations the operation resolved to.
    pub locations: usize,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Per-operation rows plus their total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub operations: Vec<OperationAnalysis>,
    pub total: Analysis,
}

impl AnalysisReport {
    pub fn new(operations: Vec<OperationAnalysis>) -> Self {
        let total = operations.iter().map(|row| row.analysis).sum();
        Self { operations, total }
    }
}
