//! In-memory operation catalog with name lookup and selection.

use super::errors::CatalogError;
use super::types::OperationSpec;

/// Ordered, validated list of operations. Names are unique.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    operations: Vec<OperationSpec>,
}

impl Catalog {
    pub(crate) fn new(operations: Vec<OperationSpec>) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &[OperationSpec] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Get an operation by exact name.
    pub fn get(&self, name: &str) -> Option<&OperationSpec> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// Get an operation by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&OperationSpec> {
        self.get(name).or_else(|| {
            self.operations
                .iter()
                .find(|op| op.name.eq_ignore_ascii_case(name))
        })
    }

    /// Select operations by name, in the order the caller supplied them.
    ///
    /// Repeated names are selected once. Any unknown name fails the whole
    /// selection so a typo never silently drops an operation.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<OperationSpec>, CatalogError> {
        let mut selected: Vec<OperationSpec> = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let op = self
                .find(name)
                .ok_or_else(|| CatalogError::UnknownOperation {
                    name: name.to_string(),
                })?;
            if !selected.iter().any(|s| s.name == op.name) {
                selected.push(op.clone());
            }
        }
        Ok(selected)
    }
}
