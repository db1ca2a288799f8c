//! Read-only preview of a cleanup.
//!
//! Resolution goes through the same [`PathResolver::resolve_all`] the
//! executor uses, so a preview and the deletion that follows it always see
//! the same target set.

use tracing::info;

use super::types::{Analysis, AnalysisReport, OperationAnalysis};
use crate::catalog::{OperationKind, OperationSpec};
use crate::paths::{PathResolver, RootMap};
use crate::usage;

#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    resolver: PathResolver<'a>,
}

impl<'a> Analyzer<'a> {
    pub fn new(roots: &'a RootMap) -> Self {
        Self {
            resolver: PathResolver::new(roots),
        }
    }

    /// Sizes and counts beneath every target of `spec`. External tools
    /// cannot be measured and analyze to zero.
    pub fn analyze(&self, spec: &OperationSpec) -> Analysis {
        self.analyze_row(spec).analysis
    }

    pub fn analyze_all(&self, specs: &[OperationSpec]) -> AnalysisReport {
        info!(event = "core.analyzer.analyze_started", operations = specs.len());
        let report = AnalysisReport::new(specs.iter().map(|spec| self.analyze_row(spec)).collect());
        info!(
            event = "core.analyzer.analyze_completed",
            operations = specs.len(),
            total_bytes = report.total.total_bytes,
            total_files = report.total.total_files
        );
        report
    }

    fn analyze_row(&self, spec: &OperationSpec) -> OperationAnalysis {
        let (locations, analysis) = match &spec.kind {
            OperationKind::ExternalTool { .. } => (0, Analysis::default()),
            _ => {
                let paths = self.resolver.resolve_all(spec.targets());
                let analysis = paths.iter().map(|p| Analysis::from(usage::measure(p))).sum();
                (paths.len(), analysis)
            }
        };

        OperationAnalysis {
            name: spec.name.clone(),
            kind: spec.kind.label(),
            locations,
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationToken;
    use crate::catalog::{Location, TargetSpec};
    use crate::deletion::{DeletionEngine, SubdirAccounting};
    use crate::executor::Executor;
    use crate::journal::RunLog;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(path: &Path, size: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0u8; size]).unwrap();
    }

    fn populate(root: &Path) {
        write(&root.join("Packages/A/cache/one"), 100);
        write(&root.join("Packages/A/cache/nested/two"), 200);
        write(&root.join("Packages/B/cache/three"), 300);
        fs::create_dir_all(root.join("Packages/C")).unwrap();
        write(&root.join("Temp/t1"), 50);
        fs::create_dir_all(root.join("Temp/empty")).unwrap();
        write(&root.join("IconCache.db"), 25);
    }

    fn composite(root: &Path) -> OperationSpec {
        OperationSpec::new(
            "Everything",
            OperationKind::CompositeDelete {
                targets: vec![
                    TargetSpec::enumerate(
                        Location::EnvRelative {
                            root: "local".to_string(),
                            suffix: PathBuf::from("Packages"),
                        },
                        &["cache"],
                    ),
                    TargetSpec::env_relative("local", "Temp"),
                    TargetSpec::literal(root.join("IconCache.db")),
                    TargetSpec::env_relative("local", "Temp"),
                ],
            },
        )
    }

    #[test]
    fn test_analysis_counts_without_deleting() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let roots = RootMap::new().with_root("local", temp.path());

        let analysis = Analyzer::new(&roots).analyze(&composite(temp.path()));

        assert_eq!(analysis.total_bytes, 675);
        assert_eq!(analysis.total_files, 5);
        assert_eq!(analysis.total_dirs, 2);
        assert!(temp.path().join("Packages/A/cache/one").exists());
    }

    #[test]
    fn test_bytes_agree_with_collapsed_deletion() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let roots = RootMap::new().with_root("local", temp.path());
        let spec = composite(temp.path());

        let analysis = Analyzer::new(&roots).analyze(&spec);
        let result = Executor::new(&roots, DeletionEngine::new(SubdirAccounting::Collapsed, 10))
            .execute(&spec, &CancellationToken::new(), &mut RunLog::discard(), &mut |_: &str| {})
            .unwrap();

        assert_eq!(result.bytes_freed(), analysis.total_bytes);
        assert_eq!(result.failed_count(), 0);
    }

    #[test]
    fn test_counts_agree_with_per_entry_deletion() {
        let temp = TempDir::new().unwrap();
        populate(temp.path());
        let roots = RootMap::new().with_root("local", temp.path());
        let spec = composite(temp.path());

        let analysis = Analyzer::new(&roots).analyze(&spec);
        let result = Executor::new(&roots, DeletionEngine::new(SubdirAccounting::PerEntry, 10))
            .execute(&spec, &CancellationToken::new(), &mut RunLog::discard(), &mut |_: &str| {})
            .unwrap();

        assert_eq!(result.bytes_freed(), analysis.total_bytes);
        assert_eq!(
            result.success_count(),
            analysis.total_files + analysis.total_dirs
        );
    }

    #[test]
    fn test_external_tool_analyzes_to_zero() {
        let roots = RootMap::new();
        let spec = OperationSpec::new(
            "DISM",
            OperationKind::ExternalTool {
                program: "Dism.exe".to_string(),
                args: vec!["/Online".to_string()],
            },
        );
        assert!(Analyzer::new(&roots).analyze(&spec).is_empty());
    }

    #[test]
    fn test_analyze_all_report_rows_and_total() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join("a/x"), 10);
        write(&temp.path().join("b/y"), 20);
        let roots = RootMap::new();
        let specs = vec![
            OperationSpec::new(
                "A",
                OperationKind::PlainDelete {
                    target: TargetSpec::literal(temp.path().join("a")),
                },
            ),
            OperationSpec::new(
                "B",
                OperationKind::PlainDelete {
                    target: TargetSpec::literal(temp.path().join("b")),
                },
            ),
        ];

        let report = Analyzer::new(&roots).analyze_all(&specs);

        assert_eq!(report.operations.len(), 2);
        assert_eq!(report.operations[0].name, "A");
        assert_eq!(report.operations[0].kind, "plain-delete");
        assert_eq!(report.operations[0].locations, 1);
        assert_eq!(report.operations[1].analysis.total_bytes, 20);
        assert_eq!(report.total.total_bytes, 30);
        assert_eq!(report.total.total_files, 2);
    }
}
